use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{TransactionState, VehicleKind};

// Request para registrar una transacción
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: VehicleKind,
    pub state: Option<TransactionState>,
}

// Request para actualizar una transacción
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub kind: Option<VehicleKind>,
    pub state: Option<TransactionState>,
}
