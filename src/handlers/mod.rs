//! HTTP handlers for the cat and breed catalog.

pub mod breed;
pub mod cat;
pub use breed::*;
pub use cat::{create_cat, delete_cat, list_cats, list_cats_by_breed, read_cat, update_cat};
