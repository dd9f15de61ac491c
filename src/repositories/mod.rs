//! Acceso a datos
//!
//! Cada colección se expone como un trait async para que los controllers no
//! dependan del motor. `Pg*Repository` es la implementación sobre PostgreSQL y
//! `MemoryStore` la implementación en proceso.

pub mod customer_repository;
pub mod memory;
pub mod transaction_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Customer, Transaction, Vehicle, VehicleStatus};
use crate::services::vehicle_query::VehicleFilter;
use crate::utils::errors::AppResult;

pub use customer_repository::PgCustomerRepository;
pub use memory::MemoryStore;
pub use transaction_repository::PgTransactionRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Vehículos que cumplen el filtro, en orden de almacenamiento
    async fn find(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Vehicle>>;
    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle>;
    /// Reemplaza el registro completo; `None` si el id no existe
    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>>;
    async fn set_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Option<Vehicle>>;
    /// `true` si existía y se borró
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Customer>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>>;
    async fn find_by_dni(&self, dni: &str) -> AppResult<Option<Customer>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Customer>>;
    /// La unicidad de email y DNI la garantiza el almacenamiento
    async fn insert(&self, customer: Customer) -> AppResult<Customer>;
    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Transaction>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>>;
    async fn insert(&self, transaction: Transaction) -> AppResult<Transaction>;
    async fn update(&self, transaction: Transaction) -> AppResult<Option<Transaction>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
