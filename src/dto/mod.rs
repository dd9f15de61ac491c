//! DTOs de entrada y salida de la API

pub mod customer_dto;
pub mod transaction_dto;
pub mod vehicle_dto;

use serde::Serialize;

// Confirmación genérica (borrados)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
