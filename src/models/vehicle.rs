//! Modelo de Vehicle
//!
//! Vehículos publicados por la agencia, ya sea para venta o alquiler.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ParseEnumError;

/// Modalidad en la que se ofrece el vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Purchase,
    Rental,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Purchase => "purchase",
            VehicleKind::Rental => "rental",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(VehicleKind::Purchase),
            "rental" => Ok(VehicleKind::Rental),
            other => Err(ParseEnumError::new("vehicle kind", other)),
        }
    }
}

/// Disponibilidad del vehículo.
///
/// Es una etiqueta plana: cualquier estado puede pasar a cualquier otro,
/// incluido volver de `Sold` a `Available`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Rented,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(VehicleStatus::Available),
            "rented" => Ok(VehicleStatus::Rented),
            "sold" => Ok(VehicleStatus::Sold),
            other => Err(ParseEnumError::new("vehicle status", other)),
        }
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub kind: VehicleKind,
    pub price: Decimal,
    pub status: VehicleStatus,
    pub details: Option<String>,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_available() {
        assert_eq!(VehicleStatus::default(), VehicleStatus::Available);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("rental".parse::<VehicleKind>().unwrap(), VehicleKind::Rental);
        assert!("alquiler".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(VehicleStatus::Sold).unwrap();
        assert_eq!(json, serde_json::json!("sold"));
    }
}
