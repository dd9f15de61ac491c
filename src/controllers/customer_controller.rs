use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::dto::customer_dto::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::models::{Customer, CustomerKey};
use crate::repositories::CustomerStore;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::merge_text;

pub const CUSTOMER_NOT_FOUND: &str = "Cliente no encontrado";

pub struct CustomerController {
    repository: Arc<dyn CustomerStore>,
}

impl CustomerController {
    pub fn new(repository: Arc<dyn CustomerStore>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.find_all().await
    }

    /// Buscar por id interno o por DNI
    pub async fn get(&self, key: &CustomerKey) -> Result<Customer, AppError> {
        let customer = match key {
            CustomerKey::Id(id) => self.repository.find_by_id(*id).await?,
            CustomerKey::Dni(dni) => self.repository.find_by_dni(dni).await?,
        };
        customer.ok_or_else(|| not_found_error(CUSTOMER_NOT_FOUND))
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> Result<Customer, AppError> {
        let customer = Customer {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            dni: request.dni,
            phone: request.phone,
        };

        // Email o DNI repetidos los rechaza el almacenamiento
        let customer = self.repository.insert(customer).await?;
        info!("👤 Cliente creado: {} (DNI {})", customer.id, customer.dni);
        Ok(customer)
    }

    pub async fn update(
        &self,
        key: &CustomerKey,
        request: UpdateCustomerRequest,
    ) -> Result<Customer, AppError> {
        let current = self.get(key).await?;

        let updated = Customer {
            id: current.id,
            first_name: merge_text(request.first_name, current.first_name),
            last_name: merge_text(request.last_name, current.last_name),
            email: merge_text(request.email, current.email),
            dni: current.dni,
            phone: merge_text(request.phone, current.phone),
        };

        self.repository
            .update(updated)
            .await
            .map_err(|e| {
                error!("❌ Error al actualizar el cliente {:?}: {}", key, e);
                e
            })?
            .ok_or_else(|| not_found_error(CUSTOMER_NOT_FOUND))
    }

    /// Las transacciones que lo referencian no se tocan
    pub async fn delete(&self, key: &CustomerKey) -> Result<(), AppError> {
        let customer = self.get(key).await?;

        let deleted = self.repository.delete(customer.id).await.map_err(|e| {
            error!("❌ Error al eliminar el cliente {:?}: {}", key, e);
            e
        })?;

        if !deleted {
            return Err(not_found_error(CUSTOMER_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn request(email: &str, dni: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            first_name: "Lucía".to_string(),
            last_name: "Pérez".to_string(),
            email: email.to_string(),
            dni: dni.to_string(),
            phone: "1155667788".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_dni() {
        let controller = CustomerController::new(Arc::new(MemoryStore::new()));
        let created = controller.create(request("lucia@mail.com", "30111222")).await.unwrap();

        let by_id = controller.get(&CustomerKey::Id(created.id)).await.unwrap();
        let by_dni = controller.get(&CustomerKey::parse("30111222")).await.unwrap();
        assert_eq!(by_id, created);
        assert_eq!(by_dni, created);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_client_error() {
        let controller = CustomerController::new(Arc::new(MemoryStore::new()));
        controller.create(request("same@mail.com", "1")).await.unwrap();
        let err = controller.create(request("same@mail.com", "2")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_only_replaces_non_empty_fields() {
        let controller = CustomerController::new(Arc::new(MemoryStore::new()));
        let created = controller.create(request("lucia@mail.com", "30111222")).await.unwrap();

        let updated = controller
            .update(
                &CustomerKey::Dni("30111222".to_string()),
                UpdateCustomerRequest {
                    phone: Some("1100000000".to_string()),
                    first_name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone, "1100000000");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.dni, created.dni);
    }

    #[tokio::test]
    async fn test_delete_by_dni() {
        let controller = CustomerController::new(Arc::new(MemoryStore::new()));
        controller.create(request("lucia@mail.com", "30111222")).await.unwrap();
        let key = CustomerKey::parse("30111222");
        controller.delete(&key).await.unwrap();
        assert!(matches!(controller.get(&key).await, Err(AppError::NotFound(_))));
    }
}
