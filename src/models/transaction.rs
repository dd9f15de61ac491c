//! Modelo de Transaction
//!
//! Una transacción guarda referencias débiles (sólo ids) a un cliente y a un
//! vehículo. Borrar cualquiera de ellos no toca las transacciones existentes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::Customer;
use super::vehicle::{Vehicle, VehicleKind};
use super::ParseEnumError;

/// Estado de la operación
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionState {
    Completed,
    #[default]
    Pending,
    Cancelled,
}

impl TransactionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Completed => "completed",
            TransactionState::Pending => "pending",
            TransactionState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(TransactionState::Completed),
            "pending" => Ok(TransactionState::Pending),
            "cancelled" => Ok(TransactionState::Cancelled),
            other => Err(ParseEnumError::new("transaction state", other)),
        }
    }
}

/// Transaction tal como se almacena
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    // No se valida contra el `kind` del vehículo referenciado
    pub kind: VehicleKind,
    pub date: DateTime<Utc>,
    pub state: TransactionState,
}

/// Transaction con sus referencias expandidas para lectura.
///
/// Una referencia colgante (cliente o vehículo borrado) se expande a `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpandedTransaction {
    pub id: Uuid,
    pub customer: Option<Customer>,
    pub vehicle: Option<Vehicle>,
    pub kind: VehicleKind,
    pub date: DateTime<Utc>,
    pub state: TransactionState,
}

impl ExpandedTransaction {
    pub fn new(
        transaction: Transaction,
        customer: Option<Customer>,
        vehicle: Option<Vehicle>,
    ) -> Self {
        Self {
            id: transaction.id,
            customer,
            vehicle,
            kind: transaction.kind,
            date: transaction.date,
            state: transaction.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults_to_pending() {
        assert_eq!(TransactionState::default(), TransactionState::Pending);
    }

    #[test]
    fn test_state_round_trips_through_str() {
        for state in [
            TransactionState::Completed,
            TransactionState::Pending,
            TransactionState::Cancelled,
        ] {
            assert_eq!(state.as_str().parse::<TransactionState>().unwrap(), state);
        }
    }

    #[test]
    fn test_dangling_reference_serializes_as_null() {
        let tx = Transaction {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            kind: VehicleKind::Rental,
            date: Utc::now(),
            state: TransactionState::Pending,
        };
        let json = serde_json::to_value(ExpandedTransaction::new(tx, None, None)).unwrap();
        assert!(json["customer"].is_null());
        assert!(json["vehicle"].is_null());
        assert_eq!(json["kind"], "rental");
    }
}
