use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{VehicleKind, VehicleStatus};
use crate::utils::validation::{validate_image_urls, validate_price, zero_as_none};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, message = "brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,

    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,

    pub kind: VehicleKind,

    #[validate(custom = "validate_price")]
    pub price: Decimal,

    pub status: Option<VehicleStatus>,

    pub details: Option<String>,

    #[serde(default)]
    #[validate(custom = "validate_image_urls")]
    pub images: Vec<String>,
}

// Request para actualizar un vehículo. Campos ausentes, vacíos o en 0 se conservan.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    pub brand: Option<String>,
    pub model: Option<String>,

    #[serde(default, deserialize_with = "zero_as_none")]
    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,

    pub kind: Option<VehicleKind>,

    #[serde(default, deserialize_with = "zero_as_none")]
    #[validate(custom = "validate_price")]
    pub price: Option<Decimal>,

    pub status: Option<VehicleStatus>,
    pub details: Option<String>,

    #[validate(custom = "validate_image_urls")]
    pub images: Option<Vec<String>>,
}

// Parámetros de búsqueda del listado: ?search=&sort=&kind=
#[derive(Debug, Default, Clone, Deserialize)]
pub struct VehicleListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub kind: Option<String>,
}
