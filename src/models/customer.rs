//! Modelo de Customer

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cliente de la agencia. `email` y `dni` son únicos en toda la tabla.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dni: String,
    pub phone: String,
}

/// Clave con la que se direcciona un cliente desde la URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerKey {
    Id(Uuid),
    Dni(String),
}

impl CustomerKey {
    /// Un segmento con forma de UUID es el id interno; cualquier otro valor es un DNI.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(id) => CustomerKey::Id(id),
            Err(_) => CustomerKey::Dni(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_key_parse() {
        let id = Uuid::new_v4();
        assert_eq!(CustomerKey::parse(&id.to_string()), CustomerKey::Id(id));
        assert_eq!(
            CustomerKey::parse("30123456"),
            CustomerKey::Dni("30123456".to_string())
        );
    }
}
