//! Demo data for an empty catalog (`CATALOG_SEED_DEMO=true`).

use crate::error::AppError;
use crate::model::{BreedData, CatData};
use crate::service::CatalogService;

pub const DEMO_BREED: &str = "Британский вислоухий";

/// Inserts one breed and one cat when there are no breeds yet. Returns whether anything was written.
pub async fn seed_demo(catalog: &CatalogService) -> Result<bool, AppError> {
    match catalog.list_breeds().await {
        Ok(_) => return Ok(false),
        Err(AppError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }
    let breed = catalog
        .create_breed(&BreedData {
            name: DEMO_BREED.to_string(),
        })
        .await?;
    catalog
        .create_cat(&CatData {
            color: "Красный".to_string(),
            age_in_months: 10,
            description: None,
            breed_id: breed.id,
        })
        .await?;
    Ok(true)
}
