use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListParams};
use crate::models::{Vehicle, VehicleStatus};
use crate::repositories::VehicleStore;
use crate::services::vehicle_query::VehicleQuery;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{merge_optional_text, merge_text, merge_value};

pub const VEHICLE_NOT_FOUND: &str = "Vehículo no encontrado";

pub struct VehicleController {
    repository: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleStore>) -> Self {
        Self { repository }
    }

    /// Listado público: sólo disponibles, con filtros opcionales y orden por precio
    pub async fn list(&self, params: VehicleListParams) -> Result<Vec<Vehicle>, AppError> {
        let query = VehicleQuery::from_params(&params);
        let vehicles = self.repository.find(&query.filter).await?;
        Ok(query.sort(vehicles))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(VEHICLE_NOT_FOUND))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            brand: request.brand,
            model: request.model,
            year: request.year,
            kind: request.kind,
            price: request.price,
            status: request.status.unwrap_or_default(),
            details: request.details,
            images: request.images,
        };

        let vehicle = self.repository.insert(vehicle).await?;
        info!("🚗 Vehículo creado: {} {} ({})", vehicle.brand, vehicle.model, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        let current = self.get_by_id(id).await?;

        let updated = Vehicle {
            id: current.id,
            brand: merge_text(request.brand, current.brand),
            model: merge_text(request.model, current.model),
            year: merge_value(request.year, current.year),
            kind: request.kind.unwrap_or(current.kind),
            price: merge_value(request.price, current.price),
            status: request.status.unwrap_or(current.status),
            details: merge_optional_text(request.details, current.details),
            images: request.images.unwrap_or(current.images),
        };

        self.repository
            .update(updated)
            .await
            .map_err(|e| {
                error!("❌ Error al actualizar el vehículo {}: {}", id, e);
                e
            })?
            .ok_or_else(|| not_found_error(VEHICLE_NOT_FOUND))
    }

    /// Sobrescribe el estado sin mirar el actual: todas las transiciones están permitidas
    pub async fn set_status(&self, id: Uuid, status: VehicleStatus) -> Result<Vehicle, AppError> {
        let vehicle = self
            .repository
            .set_status(id, status)
            .await?
            .ok_or_else(|| not_found_error(VEHICLE_NOT_FOUND))?;

        info!("🔄 Vehículo {} marcado como {}", id, status);
        Ok(vehicle)
    }

    pub async fn mark_rented(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.set_status(id, VehicleStatus::Rented).await
    }

    pub async fn mark_sold(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.set_status(id, VehicleStatus::Sold).await
    }

    pub async fn mark_available(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.set_status(id, VehicleStatus::Available).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await.map_err(|e| {
            error!("❌ Error al eliminar el vehículo {}: {}", id, e);
            e
        })?;

        if !deleted {
            return Err(not_found_error(VEHICLE_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleKind;
    use crate::repositories::MemoryStore;
    use rust_decimal::Decimal;

    fn controller() -> VehicleController {
        VehicleController::new(Arc::new(MemoryStore::new()))
    }

    fn corolla() -> CreateVehicleRequest {
        CreateVehicleRequest {
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            kind: VehicleKind::Purchase,
            price: Decimal::from(15000),
            status: None,
            details: Some("Full".to_string()),
            images: vec!["https://cdn.example.com/corolla.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_available() {
        let controller = controller();
        let vehicle = controller.create(corolla()).await.unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(controller.get_by_id(vehicle.id).await.unwrap(), vehicle);
    }

    #[tokio::test]
    async fn test_every_status_transition_is_allowed() {
        let controller = controller();
        let id = controller.create(corolla()).await.unwrap().id;
        let all = [VehicleStatus::Available, VehicleStatus::Rented, VehicleStatus::Sold];

        for from in all {
            for to in all {
                controller.set_status(id, from).await.unwrap();
                let vehicle = controller.set_status(id, to).await.unwrap();
                assert_eq!(vehicle.status, to);
            }
        }
    }

    #[tokio::test]
    async fn test_mark_rented_is_idempotent() {
        let controller = controller();
        let id = controller.create(corolla()).await.unwrap().id;
        assert_eq!(controller.mark_rented(id).await.unwrap().status, VehicleStatus::Rented);
        assert_eq!(controller.mark_rented(id).await.unwrap().status, VehicleStatus::Rented);
    }

    #[tokio::test]
    async fn test_sold_vehicle_can_be_made_available_again() {
        let controller = controller();
        let id = controller.create(corolla()).await.unwrap().id;
        controller.mark_sold(id).await.unwrap();
        assert_eq!(controller.mark_available(id).await.unwrap().status, VehicleStatus::Available);
    }

    #[tokio::test]
    async fn test_status_change_on_missing_vehicle_is_not_found() {
        let err = controller().mark_sold(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let controller = controller();
        let stored = controller.create(corolla()).await.unwrap();

        let updated = controller
            .update(
                stored.id,
                UpdateVehicleRequest {
                    price: Some(Decimal::from(14000)),
                    brand: Some(String::new()),
                    year: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, Decimal::from(14000));
        assert_eq!(updated.brand, stored.brand);
        assert_eq!(updated.model, stored.model);
        assert_eq!(updated.year, stored.year);
        assert_eq!(updated.details, stored.details);
        assert_eq!(updated.images, stored.images);
    }

    #[tokio::test]
    async fn test_list_hides_unavailable_and_sorts() {
        let controller = controller();
        let cheap = controller
            .create(CreateVehicleRequest { price: Decimal::from(9000), ..corolla() })
            .await
            .unwrap();
        let sold = controller.create(corolla()).await.unwrap();
        let pricey = controller
            .create(CreateVehicleRequest { price: Decimal::from(30000), ..corolla() })
            .await
            .unwrap();
        controller.mark_sold(sold.id).await.unwrap();

        let listed = controller
            .list(VehicleListParams {
                sort: Some("price_desc".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![pricey.id, cheap.id]);
    }

    #[tokio::test]
    async fn test_delete_missing_vehicle_is_not_found() {
        let controller = controller();
        let id = controller.create(corolla()).await.unwrap().id;
        controller.delete(id).await.unwrap();
        assert!(matches!(controller.delete(id).await, Err(AppError::NotFound(_))));
    }
}
