use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListParams};
use crate::dto::MessageResponse;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_id, PartialJson, ValidatedJson};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/rent", put(mark_rented))
        .route("/:id/purchase", put(mark_sold))
        .route("/:id/available", put(mark_available))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<VehicleListParams>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state.vehicle_controller().list(params).await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state.vehicle_controller().get_by_id(parse_id(&id)?).await?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = state.vehicle_controller().create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    PartialJson(request): PartialJson<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .vehicle_controller()
        .update(parse_id(&id)?, request)
        .await?;
    Ok(Json(vehicle))
}

async fn mark_rented(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state.vehicle_controller().mark_rented(parse_id(&id)?).await?;
    Ok(Json(vehicle))
}

async fn mark_sold(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state.vehicle_controller().mark_sold(parse_id(&id)?).await?;
    Ok(Json(vehicle))
}

async fn mark_available(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .vehicle_controller()
        .mark_available(parse_id(&id)?)
        .await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.vehicle_controller().delete(parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Vehículo eliminado")))
}
