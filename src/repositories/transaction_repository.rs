use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::TransactionStore;
use crate::models::Transaction;
use crate::utils::errors::{database_error, AppError, AppResult};

const TRANSACTION_COLUMNS: &str = "id, customer_id, vehicle_id, kind, date, state";

// customer_id y vehicle_id no tienen FOREIGN KEY: las referencias pueden quedar colgando
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    customer_id: Uuid,
    vehicle_id: Uuid,
    kind: String,
    date: DateTime<Utc>,
    state: String,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: row.id,
            customer_id: row.customer_id,
            vehicle_id: row.vehicle_id,
            kind: row.kind.parse()?,
            date: row.date,
            state: row.state.parse()?,
        })
    }
}

pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionRepository {
    async fn find_all(&self) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions ORDER BY seq",
            TRANSACTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE id = $1",
            TRANSACTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Transaction::try_from).transpose()
    }

    async fn insert(&self, transaction: Transaction) -> AppResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (id, customer_id, vehicle_id, kind, date, state)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(transaction.id)
        .bind(transaction.customer_id)
        .bind(transaction.vehicle_id)
        .bind(transaction.kind.as_str())
        .bind(transaction.date)
        .bind(transaction.state.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Transaction::try_from(row)
    }

    async fn update(&self, transaction: Transaction) -> AppResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            UPDATE transactions
            SET customer_id = $2, vehicle_id = $3, kind = $4, date = $5, state = $6
            WHERE id = $1
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(transaction.id)
        .bind(transaction.customer_id)
        .bind(transaction.vehicle_id)
        .bind(transaction.kind.as_str())
        .bind(transaction.date)
        .bind(transaction.state.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Transaction::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
