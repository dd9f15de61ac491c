use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::VehicleStore;
use crate::models::{Vehicle, VehicleStatus};
use crate::services::vehicle_query::VehicleFilter;
use crate::utils::errors::{database_error, AppError, AppResult};

const VEHICLE_COLUMNS: &str = "id, brand, model, year, kind, price, status, details, images";

// Fila tal como sale de la tabla vehicles
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    brand: String,
    model: String,
    year: i32,
    kind: String,
    price: Decimal,
    status: String,
    details: Option<String>,
    images: Vec<String>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: row.id,
            brand: row.brand,
            model: row.model,
            year: row.year,
            kind: row.kind.parse()?,
            price: row.price,
            status: row.status.parse()?,
            details: row.details,
            images: row.images,
        })
    }
}

fn into_vehicles(rows: Vec<VehicleRow>) -> AppResult<Vec<Vehicle>> {
    rows.into_iter().map(Vehicle::try_from).collect()
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Traducir el filtro a un `SELECT` parametrizado
pub(crate) fn build_find_query(filter: &VehicleFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM vehicles WHERE status = ", VEHICLE_COLUMNS));
    builder.push_bind(filter.status.as_str());

    if let Some(kind) = &filter.kind {
        builder.push(" AND kind = ");
        builder.push_bind(kind.clone());
    }

    if let Some(pattern) = filter.like_pattern() {
        builder.push(" AND (brand ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR model ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    builder.push(" ORDER BY seq");
    builder
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn find(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let mut builder = build_find_query(filter);
        let rows = builder
            .build_query_as::<VehicleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        into_vehicles(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = ANY($1)",
            VEHICLE_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        into_vehicles(rows)
    }

    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (id, brand, model, year, kind, price, status, details, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.kind.as_str())
        .bind(vehicle.price)
        .bind(vehicle.status.as_str())
        .bind(vehicle.details)
        .bind(vehicle.images)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Vehicle::try_from(row)
    }

    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, year = $4, kind = $5, price = $6, status = $7, details = $8, images = $9
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(vehicle.brand)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.kind.as_str())
        .bind(vehicle.price)
        .bind(vehicle.status.as_str())
        .bind(vehicle.details)
        .bind(vehicle.images)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn set_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING {}",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
