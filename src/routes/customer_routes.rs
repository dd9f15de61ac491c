use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::customer_dto::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::dto::MessageResponse;
use crate::models::{Customer, CustomerKey};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PartialJson, ValidatedJson};

// `:key` acepta el id interno (UUID) o el DNI
pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:key",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.customer_controller().list().await?;
    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .customer_controller()
        .get(&CustomerKey::parse(&key))
        .await?;
    Ok(Json(customer))
}

async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let customer = state.customer_controller().create(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(key): Path<String>,
    PartialJson(request): PartialJson<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .customer_controller()
        .update(&CustomerKey::parse(&key), request)
        .await?;
    Ok(Json(customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .customer_controller()
        .delete(&CustomerKey::parse(&key))
        .await?;
    Ok(Json(MessageResponse::new("Cliente eliminado con éxito")))
}
