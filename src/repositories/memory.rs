//! Almacenamiento en proceso
//!
//! Implementa los tres traits de almacenamiento sobre vectores protegidos por
//! `RwLock`. Conserva el orden de inserción y aplica la unicidad de email y
//! DNI dentro del mismo lock de escritura, igual que lo haría un índice único.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CustomerStore, TransactionStore, VehicleStore};
use crate::models::{Customer, Transaction, Vehicle, VehicleStatus};
use crate::services::vehicle_query::VehicleFilter;
use crate::utils::errors::{duplicate_key_error, AppResult};

#[derive(Default)]
pub struct MemoryStore {
    vehicles: RwLock<Vec<Vehicle>>,
    customers: RwLock<Vec<Customer>>,
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_customer_unique(customers: &[Customer], candidate: &Customer) -> AppResult<()> {
    for existing in customers.iter().filter(|c| c.id != candidate.id) {
        if existing.email == candidate.email {
            return Err(duplicate_key_error("customers", "email", &candidate.email));
        }
        if existing.dni == candidate.dni {
            return Err(duplicate_key_error("customers", "dni", &candidate.dni));
        }
    }
    Ok(())
}

// Reemplaza el registro con el mismo id, si existe
fn replace<T: Clone>(items: &mut [T], item: T, same: impl Fn(&T) -> bool) -> Option<T> {
    let slot = items.iter_mut().find(|existing| same(existing))?;
    *slot = item;
    Some(slot.clone())
}

fn remove<T>(items: &mut Vec<T>, same: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !same(item));
    items.len() != before
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn find(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().filter(|v| filter.matches(v)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().filter(|v| ids.contains(&v.id)).cloned().collect())
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let id = vehicle.id;
        let mut vehicles = self.vehicles.write().await;
        Ok(replace(&mut *vehicles, vehicle, |v| v.id == id))
    }

    async fn set_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        Ok(vehicles.iter_mut().find(|v| v.id == id).map(|v| {
            v.status = status;
            v.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        Ok(remove(&mut *vehicles, |v| v.id == id))
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        Ok(self.customers.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_dni(&self, dni: &str) -> AppResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.dni == dni).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }

    async fn insert(&self, customer: Customer) -> AppResult<Customer> {
        let mut customers = self.customers.write().await;
        check_customer_unique(&customers, &customer)?;
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>> {
        let mut customers = self.customers.write().await;
        if !customers.iter().any(|c| c.id == customer.id) {
            return Ok(None);
        }
        check_customer_unique(&customers, &customer)?;
        let id = customer.id;
        Ok(replace(&mut *customers, customer, |c| c.id == id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut customers = self.customers.write().await;
        Ok(remove(&mut *customers, |c| c.id == id))
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, transaction: Transaction) -> AppResult<Transaction> {
        self.transactions.write().await.push(transaction.clone());
        Ok(transaction)
    }

    async fn update(&self, transaction: Transaction) -> AppResult<Option<Transaction>> {
        let id = transaction.id;
        let mut transactions = self.transactions.write().await;
        Ok(replace(&mut *transactions, transaction, |t| t.id == id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut transactions = self.transactions.write().await;
        Ok(remove(&mut *transactions, |t| t.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(email: &str, dni: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: email.to_string(),
            dni: dni.to_string(),
            phone: "1122334455".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_dni_is_rejected() {
        let store = MemoryStore::new();
        CustomerStore::insert(&store, customer("a@x.com", "1")).await.unwrap();
        let err = CustomerStore::insert(&store, customer("b@x.com", "1"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dni"));
        assert_eq!(CustomerStore::find_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_may_keep_own_email() {
        let store = MemoryStore::new();
        let mut stored = CustomerStore::insert(&store, customer("a@x.com", "1")).await.unwrap();
        stored.phone = "999".to_string();
        let updated = CustomerStore::update(&store, stored).await.unwrap().unwrap();
        assert_eq!(updated.phone, "999");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_rejected() {
        let store = MemoryStore::new();
        CustomerStore::insert(&store, customer("a@x.com", "1")).await.unwrap();
        let mut second = CustomerStore::insert(&store, customer("b@x.com", "2")).await.unwrap();
        second.email = "a@x.com".to_string();
        assert!(CustomerStore::update(&store, second).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!TransactionStore::delete(&store, Uuid::new_v4()).await.unwrap());
    }
}
