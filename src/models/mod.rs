//! Modelos del sistema
//!
//! Registros de dominio de la agencia: vehículos, clientes y transacciones.

pub mod customer;
pub mod transaction;
pub mod vehicle;

pub use customer::{Customer, CustomerKey};
pub use transaction::{ExpandedTransaction, Transaction, TransactionState};
pub use vehicle::{Vehicle, VehicleKind, VehicleStatus};

/// Valor textual que no corresponde a ninguna variante de un enum del dominio
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: '{value}'")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}
