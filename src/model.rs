//! Catalog entities and write payloads.

use serde::{Deserialize, Serialize};

/// Column width of `cat.color` and `breed.name`.
pub const NAME_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Breed {
    pub id: i32,
    pub name: String,
}

/// A cat joined with its breed, as returned by every read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub id: i32,
    pub color: String,
    pub age_in_months: i32,
    pub description: Option<String>,
    pub breed: Breed,
}

/// Full field set for create and update. Update replaces every field,
/// so an omitted `description` becomes null.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatData {
    pub color: String,
    pub age_in_months: i32,
    #[serde(default)]
    pub description: Option<String>,
    pub breed_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedData {
    pub name: String,
}

/// Result of a locked lookup-then-write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    NotFound,
}
