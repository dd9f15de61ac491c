use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::CustomerStore;
use crate::models::Customer;
use crate::utils::errors::{database_error, AppResult};

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, email, dni, phone";

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerRepository {
    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers ORDER BY seq",
            CUSTOMER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn find_by_dni(&self, dni: &str) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE dni = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(dni)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = ANY($1)",
            CUSTOMER_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn insert(&self, customer: Customer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (id, first_name, last_name, email, dni, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(customer.id)
        .bind(customer.first_name)
        .bind(customer.last_name)
        .bind(customer.email)
        .bind(customer.dni)
        .bind(customer.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, email = $4, dni = $5, phone = $6
            WHERE id = $1
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(customer.id)
        .bind(customer.first_name)
        .bind(customer.last_name)
        .bind(customer.email)
        .bind(customer.dni)
        .bind(customer.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
