//! Cat handlers: list, list by breed, read, create, update, delete.

use crate::error::AppError;
use crate::model::CatData;
use crate::response::{cats_ok, status_created, status_ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// Unwrap a JSON body, turning extractor rejections into the error envelope.
/// Shape errors (missing field, wrong type) are validation errors, an oversized body keeps
/// its 413, anything else is a bad request.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::JsonDataError(e)) => Err(AppError::Validation(e.body_text())),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(AppError::PayloadTooLarge(e.body_text())),
        Err(e) => Err(AppError::BadRequest(e.body_text())),
    }
}

pub async fn list_cats(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let cats = state.catalog.list_cats().await?;
    Ok(cats_ok(cats))
}

pub async fn list_cats_by_breed(
    State(state): State<AppState>,
    Path(breed): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let cats = state.catalog.list_cats_by_breed(&breed).await?;
    Ok(cats_ok(cats))
}

pub async fn read_cat(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let cat = state.catalog.get_cat(parse_id(&id_str)?).await?;
    Ok((StatusCode::OK, Json(cat)))
}

pub async fn create_cat(
    State(state): State<AppState>,
    payload: Result<Json<CatData>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let data = json_body(payload)?;
    let body = state.catalog.create_cat(&data).await?;
    Ok(status_created(body))
}

pub async fn update_cat(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<CatData>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let data = json_body(payload)?;
    let body = state.catalog.update_cat(id, &data).await?;
    Ok(status_ok(body))
}

pub async fn delete_cat(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body = state.catalog.delete_cat(parse_id(&id_str)?).await?;
    Ok(status_ok(body))
}
