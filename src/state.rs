//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::customer_controller::CustomerController;
use crate::controllers::transaction_controller::TransactionController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::repositories::{
    CustomerStore, MemoryStore, PgCustomerRepository, PgTransactionRepository,
    PgVehicleRepository, TransactionStore, VehicleStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub transactions: Arc<dyn TransactionStore>,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config,
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            transactions: Arc::new(PgTransactionRepository::new(pool)),
        }
    }

    /// Estado respaldado por un `MemoryStore` compartido por las tres colecciones
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config,
            vehicles: store.clone(),
            customers: store.clone(),
            transactions: store,
        }
    }

    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.vehicles.clone())
    }

    pub fn customer_controller(&self) -> CustomerController {
        CustomerController::new(self.customers.clone())
    }

    pub fn transaction_controller(&self) -> TransactionController {
        TransactionController::new(
            self.transactions.clone(),
            self.customers.clone(),
            self.vehicles.clone(),
        )
    }
}
