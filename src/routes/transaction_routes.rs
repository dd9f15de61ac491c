use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::transaction_dto::{CreateTransactionRequest, UpdateTransactionRequest};
use crate::dto::MessageResponse;
use crate::models::{ExpandedTransaction, Transaction};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_id, PartialJson, ValidatedJson};

pub fn create_transaction_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpandedTransaction>>, AppError> {
    let transactions = state.transaction_controller().list().await?;
    Ok(Json(transactions))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExpandedTransaction>, AppError> {
    let transaction = state
        .transaction_controller()
        .get_by_id(parse_id(&id)?)
        .await?;
    Ok(Json(transaction))
}

async fn create_transaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let transaction = state.transaction_controller().create(request).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    PartialJson(request): PartialJson<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state
        .transaction_controller()
        .update(parse_id(&id)?, request)
        .await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .transaction_controller()
        .delete(parse_id(&id)?)
        .await?;
    Ok(Json(MessageResponse::new("Transacción eliminada con éxito")))
}
