//! Catalog routes, mounted under the configured prefix.
//! `/cats/breeds...` is static and wins over `/cats/:cat_id`.

use crate::handlers::{
    create_breed, create_cat, delete_cat, list_breeds, list_cats, list_cats_by_breed, read_cat, update_cat,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/cats", get(list_cats).post(create_cat))
        .route("/cats/breeds", get(list_breeds).post(create_breed))
        .route("/cats/breeds/:breed", get(list_cats_by_breed))
        .route("/cats/:cat_id", get(read_cat).patch(update_cat).delete(delete_cat))
        .with_state(state)
}
