//! Cat catalog: cats and breeds REST backend with PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use model::{Breed, BreedData, Cat, CatData, WriteOutcome};
pub use response::{Status, StatusMessage};
pub use routes::{app, catalog_routes, common_routes};
pub use service::CatalogService;
pub use state::AppState;
pub use store::{connect, ensure_catalog_tables, ensure_database_exists, CatalogStore, PgCatalogStore};
