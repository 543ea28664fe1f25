//! Response bodies for catalog routes.

use crate::model::{Breed, Cat};
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Success,
}

/// `{status, message}` returned by create, update and delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: Status,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatList {
    pub cats: Vec<Cat>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BreedList {
    pub breeds: Vec<Breed>,
}

pub fn cats_ok(cats: Vec<Cat>) -> (StatusCode, Json<CatList>) {
    (StatusCode::OK, Json(CatList { cats }))
}

pub fn breeds_ok(breeds: Vec<Breed>) -> (StatusCode, Json<BreedList>) {
    (StatusCode::OK, Json(BreedList { breeds }))
}

pub fn status_ok(body: StatusMessage) -> (StatusCode, Json<StatusMessage>) {
    (StatusCode::OK, Json(body))
}

pub fn status_created(body: StatusMessage) -> (StatusCode, Json<StatusMessage>) {
    (StatusCode::CREATED, Json(body))
}
