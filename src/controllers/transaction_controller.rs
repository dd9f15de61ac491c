use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::dto::transaction_dto::{CreateTransactionRequest, UpdateTransactionRequest};
use crate::models::{ExpandedTransaction, Transaction};
use crate::repositories::{CustomerStore, TransactionStore, VehicleStore};
use crate::utils::errors::{not_found_error, AppError};

pub const TRANSACTION_NOT_FOUND: &str = "Transacción no encontrada";

pub struct TransactionController {
    repository: Arc<dyn TransactionStore>,
    customers: Arc<dyn CustomerStore>,
    vehicles: Arc<dyn VehicleStore>,
}

impl TransactionController {
    pub fn new(
        repository: Arc<dyn TransactionStore>,
        customers: Arc<dyn CustomerStore>,
        vehicles: Arc<dyn VehicleStore>,
    ) -> Self {
        Self {
            repository,
            customers,
            vehicles,
        }
    }

    /// Reemplazar los ids de cliente y vehículo por los registros completos.
    ///
    /// Hace una sola consulta por colección; una referencia que ya no existe
    /// queda en `None`.
    async fn expand(&self, transactions: Vec<Transaction>) -> Result<Vec<ExpandedTransaction>, AppError> {
        let mut customer_ids: Vec<Uuid> = transactions.iter().map(|t| t.customer_id).collect();
        customer_ids.sort_unstable();
        customer_ids.dedup();
        let mut vehicle_ids: Vec<Uuid> = transactions.iter().map(|t| t.vehicle_id).collect();
        vehicle_ids.sort_unstable();
        vehicle_ids.dedup();

        let customers: HashMap<Uuid, _> = self
            .customers
            .find_by_ids(&customer_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let vehicles: HashMap<Uuid, _> = self
            .vehicles
            .find_by_ids(&vehicle_ids)
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        Ok(transactions
            .into_iter()
            .map(|t| {
                let customer = customers.get(&t.customer_id).cloned();
                let vehicle = vehicles.get(&t.vehicle_id).cloned();
                ExpandedTransaction::new(t, customer, vehicle)
            })
            .collect())
    }

    pub async fn list(&self) -> Result<Vec<ExpandedTransaction>, AppError> {
        let transactions = self.repository.find_all().await?;
        self.expand(transactions).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ExpandedTransaction, AppError> {
        let transaction = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(TRANSACTION_NOT_FOUND))?;

        self.expand(vec![transaction])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("expansion dropped the transaction".to_string()))
    }

    /// Las referencias no se verifican: pueden apuntar a registros inexistentes
    pub async fn create(&self, request: CreateTransactionRequest) -> Result<Transaction, AppError> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            customer_id: request.customer_id,
            vehicle_id: request.vehicle_id,
            kind: request.kind,
            date: Utc::now(),
            state: request.state.unwrap_or_default(),
        };

        let transaction = self.repository.insert(transaction).await?;
        info!(
            "🧾 Transacción {} creada ({} / cliente {} / vehículo {})",
            transaction.id, transaction.kind, transaction.customer_id, transaction.vehicle_id
        );
        Ok(transaction)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(TRANSACTION_NOT_FOUND))?;

        let updated = Transaction {
            id: current.id,
            customer_id: request.customer_id.unwrap_or(current.customer_id),
            vehicle_id: request.vehicle_id.unwrap_or(current.vehicle_id),
            kind: request.kind.unwrap_or(current.kind),
            date: current.date,
            state: request.state.unwrap_or(current.state),
        };

        self.repository
            .update(updated)
            .await
            .map_err(|e| {
                error!("❌ Error al actualizar la transacción {}: {}", id, e);
                e
            })?
            .ok_or_else(|| not_found_error(TRANSACTION_NOT_FOUND))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await.map_err(|e| {
            error!("❌ Error al eliminar la transacción {}: {}", id, e);
            e
        })?;

        if !deleted {
            return Err(not_found_error(TRANSACTION_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, TransactionState, Vehicle, VehicleKind, VehicleStatus};
    use crate::repositories::MemoryStore;
    use rust_decimal::Decimal;

    async fn seeded() -> (Arc<MemoryStore>, Customer, Vehicle) {
        let store = Arc::new(MemoryStore::new());
        let customer = CustomerStore::insert(
            store.as_ref(),
            Customer {
                id: Uuid::new_v4(),
                first_name: "Juan".to_string(),
                last_name: "Gómez".to_string(),
                email: "juan@mail.com".to_string(),
                dni: "28999111".to_string(),
                phone: "1144556677".to_string(),
            },
        )
        .await
        .unwrap();
        let vehicle = VehicleStore::insert(
            store.as_ref(),
            Vehicle {
                id: Uuid::new_v4(),
                brand: "Renault".to_string(),
                model: "Kangoo".to_string(),
                year: 2019,
                kind: VehicleKind::Rental,
                price: Decimal::from(500),
                status: VehicleStatus::Available,
                details: None,
                images: vec![],
            },
        )
        .await
        .unwrap();
        (store, customer, vehicle)
    }

    fn controller(store: &Arc<MemoryStore>) -> TransactionController {
        TransactionController::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending_and_expands_on_read() {
        let (store, customer, vehicle) = seeded().await;
        let controller = controller(&store);

        let created = controller
            .create(CreateTransactionRequest {
                customer_id: customer.id,
                vehicle_id: vehicle.id,
                kind: VehicleKind::Rental,
                state: None,
            })
            .await
            .unwrap();
        assert_eq!(created.state, TransactionState::Pending);

        let expanded = controller.get_by_id(created.id).await.unwrap();
        assert_eq!(expanded.customer, Some(customer));
        assert_eq!(expanded.vehicle, Some(vehicle));
    }

    #[tokio::test]
    async fn test_dangling_references_expand_to_none() {
        let (store, customer, vehicle) = seeded().await;
        let controller = controller(&store);
        let created = controller
            .create(CreateTransactionRequest {
                customer_id: customer.id,
                vehicle_id: vehicle.id,
                kind: VehicleKind::Purchase,
                state: Some(TransactionState::Completed),
            })
            .await
            .unwrap();

        CustomerStore::delete(store.as_ref(), customer.id).await.unwrap();
        VehicleStore::delete(store.as_ref(), vehicle.id).await.unwrap();

        let listed = controller.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert!(listed[0].customer.is_none());
        assert!(listed[0].vehicle.is_none());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_missing_fields() {
        let (store, customer, vehicle) = seeded().await;
        let controller = controller(&store);
        let created = controller
            .create(CreateTransactionRequest {
                customer_id: customer.id,
                vehicle_id: vehicle.id,
                kind: VehicleKind::Rental,
                state: None,
            })
            .await
            .unwrap();

        let updated = controller
            .update(
                created.id,
                UpdateTransactionRequest {
                    state: Some(TransactionState::Cancelled),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.state, TransactionState::Cancelled);
        assert_eq!(updated.customer_id, created.customer_id);
        assert_eq!(updated.vehicle_id, created.vehicle_id);
        assert_eq!(updated.kind, created.kind);
        assert_eq!(updated.date, created.date);
    }

    #[tokio::test]
    async fn test_delete_missing_transaction() {
        let (store, _, _) = seeded().await;
        let err = controller(&store).delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == TRANSACTION_NOT_FOUND));
    }
}
