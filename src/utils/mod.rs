//! Utilidades del sistema
//!
//! Manejo de errores y validación de requests.

pub mod errors;
pub mod validation;
