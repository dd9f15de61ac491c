use serde::Deserialize;
use validator::Validate;

// Request para registrar un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "dni is required"))]
    pub dni: String,

    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

// Request para actualizar un cliente. El DNI no se modifica.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
