mod catalog;
mod common;

pub use catalog::catalog_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application: common routes at the root, catalog under `prefix`.
pub fn app(state: AppState, prefix: &str) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(prefix, catalog_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
