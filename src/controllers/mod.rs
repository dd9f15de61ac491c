//! Controllers: reglas de negocio de cada recurso

pub mod customer_controller;
pub mod transaction_controller;
pub mod vehicle_controller;
