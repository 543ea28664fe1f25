//! CatalogService: catalog operations with not-found and validation translation.

mod catalog;
mod validation;
pub use catalog::{CatalogService, CREATED_MESSAGE, DELETED_MESSAGE, UPDATED_MESSAGE};
pub use validation::RequestValidator;
