//! Construcción de consultas del listado de vehículos
//!
//! Traduce los parámetros opcionales `search`, `sort` y `kind` en un filtro
//! (que ejecuta el almacenamiento) y un orden por precio que se aplica en
//! memoria sobre el resultado ya obtenido.
//!
//! Reglas del filtro, siempre en conjunción:
//! 1. sólo vehículos con `status = available` (fijo, no lo elige el cliente);
//! 2. si llega `kind`, igualdad exacta contra el texto recibido;
//! 3. si llega `search` no vacío, `brand` o `model` lo contienen sin
//!    distinguir mayúsculas.

use std::cmp::Ordering;

use crate::dto::vehicle_dto::VehicleListParams;
use crate::models::{Vehicle, VehicleStatus};

/// Predicado sobre la colección de vehículos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleFilter {
    pub status: VehicleStatus,
    /// Texto tal cual llegó; un valor desconocido simplemente no coincide con nada
    pub kind: Option<String>,
    pub search: Option<String>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if vehicle.status != self.status {
            return false;
        }
        if let Some(kind) = &self.kind {
            if vehicle.kind.as_str() != kind {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            return vehicle.brand.to_lowercase().contains(&needle)
                || vehicle.model.to_lowercase().contains(&needle);
        }
        true
    }

    /// Patrón ILIKE para `search`, con los comodines del usuario escapados
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|search| {
            let mut pattern = String::with_capacity(search.len() + 2);
            pattern.push('%');
            for c in search.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

/// Orden por precio aplicado después de la consulta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    Ascending,
    Descending,
}

impl PriceOrder {
    /// `price_asc` / `price_desc`; cualquier otro valor no ordena
    pub fn parse(sort: Option<&str>) -> Option<Self> {
        match sort {
            Some("price_asc") => Some(PriceOrder::Ascending),
            Some("price_desc") => Some(PriceOrder::Descending),
            _ => None,
        }
    }

    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            PriceOrder::Ascending => a.price.cmp(&b.price),
            PriceOrder::Descending => b.price.cmp(&a.price),
        }
    }

    pub fn apply(&self, vehicles: &mut [Vehicle]) {
        vehicles.sort_by(|a, b| self.compare(a, b));
    }
}

/// Consulta completa del listado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuery {
    pub filter: VehicleFilter,
    pub order: Option<PriceOrder>,
}

impl VehicleQuery {
    pub fn from_params(params: &VehicleListParams) -> Self {
        Self {
            filter: VehicleFilter {
                status: VehicleStatus::Available,
                kind: non_empty(params.kind.as_deref()),
                search: non_empty(params.search.as_deref()),
            },
            order: PriceOrder::parse(params.sort.as_deref()),
        }
    }

    /// Ordenar el resultado; sin orden se conserva el del almacenamiento
    pub fn sort(&self, mut vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        if let Some(order) = self.order {
            order.apply(&mut vehicles);
        }
        vehicles
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleKind;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn vehicle(brand: &str, model: &str, kind: VehicleKind, price: i64, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            brand: brand.to_string(),
            model: model.to_string(),
            year: 2020,
            kind,
            price: Decimal::from(price),
            status,
            details: None,
            images: vec![],
        }
    }

    fn params(search: Option<&str>, sort: Option<&str>, kind: Option<&str>) -> VehicleListParams {
        VehicleListParams {
            search: search.map(str::to_string),
            sort: sort.map(str::to_string),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_base_filter_is_available_only() {
        let query = VehicleQuery::from_params(&VehicleListParams::default());
        assert_eq!(query.filter.status, VehicleStatus::Available);
        assert!(query.filter.kind.is_none());
        assert!(query.filter.search.is_none());
        assert!(query.order.is_none());

        let sold = vehicle("Toyota", "Corolla", VehicleKind::Purchase, 15000, VehicleStatus::Sold);
        let rented = vehicle("Ford", "Ka", VehicleKind::Rental, 9000, VehicleStatus::Rented);
        let free = vehicle("Fiat", "Cronos", VehicleKind::Purchase, 12000, VehicleStatus::Available);
        assert!(!query.filter.matches(&sold));
        assert!(!query.filter.matches(&rented));
        assert!(query.filter.matches(&free));
    }

    #[test]
    fn test_kind_is_exact_match() {
        let query = VehicleQuery::from_params(&params(None, None, Some("rental")));
        let rental = vehicle("Ford", "Ka", VehicleKind::Rental, 9000, VehicleStatus::Available);
        let purchase = vehicle("Fiat", "Cronos", VehicleKind::Purchase, 12000, VehicleStatus::Available);
        assert!(query.filter.matches(&rental));
        assert!(!query.filter.matches(&purchase));
    }

    #[test]
    fn test_unknown_kind_matches_nothing() {
        let query = VehicleQuery::from_params(&params(None, None, Some("alquiler")));
        let rental = vehicle("Ford", "Ka", VehicleKind::Rental, 9000, VehicleStatus::Available);
        assert_eq!(query.filter.kind.as_deref(), Some("alquiler"));
        assert!(!query.filter.matches(&rental));
    }

    #[test]
    fn test_search_is_case_insensitive_substring_on_brand_or_model() {
        let query = VehicleQuery::from_params(&params(Some("ROL"), None, None));
        let corolla = vehicle("Toyota", "Corolla", VehicleKind::Purchase, 15000, VehicleStatus::Available);
        let chevrolet = vehicle("Chevrolet", "Onix", VehicleKind::Purchase, 11000, VehicleStatus::Available);
        let fiat = vehicle("Fiat", "Cronos", VehicleKind::Purchase, 12000, VehicleStatus::Available);
        assert!(query.filter.matches(&corolla));
        assert!(query.filter.matches(&chevrolet));
        assert!(!query.filter.matches(&fiat));
    }

    #[test]
    fn test_empty_search_is_ignored() {
        let query = VehicleQuery::from_params(&params(Some(""), Some(""), Some("")));
        assert!(query.filter.search.is_none());
        assert!(query.filter.kind.is_none());
        assert!(query.order.is_none());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let query = VehicleQuery::from_params(&params(Some("50%_a\\b"), None, None));
        assert_eq!(query.filter.like_pattern().as_deref(), Some("%50\\%\\_a\\\\b%"));
        assert!(VehicleQuery::from_params(&VehicleListParams::default())
            .filter
            .like_pattern()
            .is_none());
    }

    #[test]
    fn test_price_ordering() {
        let vehicles = vec![
            vehicle("A", "a", VehicleKind::Purchase, 300, VehicleStatus::Available),
            vehicle("B", "b", VehicleKind::Purchase, 100, VehicleStatus::Available),
            vehicle("C", "c", VehicleKind::Purchase, 200, VehicleStatus::Available),
        ];

        let asc = VehicleQuery::from_params(&params(None, Some("price_asc"), None)).sort(vehicles.clone());
        let prices: Vec<i64> = asc.iter().map(|v| v.price.mantissa() as i64).collect();
        assert_eq!(prices, vec![100, 200, 300]);

        let desc = VehicleQuery::from_params(&params(None, Some("price_desc"), None)).sort(vehicles.clone());
        let prices: Vec<i64> = desc.iter().map(|v| v.price.mantissa() as i64).collect();
        assert_eq!(prices, vec![300, 200, 100]);
    }

    #[test]
    fn test_unknown_sort_keeps_storage_order() {
        let vehicles = vec![
            vehicle("A", "a", VehicleKind::Purchase, 300, VehicleStatus::Available),
            vehicle("B", "b", VehicleKind::Purchase, 100, VehicleStatus::Available),
        ];
        let query = VehicleQuery::from_params(&params(None, Some("precio_asc"), None));
        assert_eq!(query.sort(vehicles.clone()), vehicles);
    }
}
