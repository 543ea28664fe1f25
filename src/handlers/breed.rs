//! Breed handlers.

use crate::error::AppError;
use crate::handlers::cat::json_body;
use crate::model::BreedData;
use crate::response::breeds_ok;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

pub async fn list_breeds(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let breeds = state.catalog.list_breeds().await?;
    Ok(breeds_ok(breeds))
}

pub async fn create_breed(
    State(state): State<AppState>,
    payload: Result<Json<BreedData>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let data = json_body(payload)?;
    let breed = state.catalog.create_breed(&data).await?;
    Ok((StatusCode::CREATED, Json(breed)))
}
