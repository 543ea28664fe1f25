//! Catalog operations over a `CatalogStore`.

use crate::error::AppError;
use crate::model::{Breed, BreedData, Cat, CatData, WriteOutcome};
use crate::response::StatusMessage;
use crate::service::RequestValidator;
use crate::store::CatalogStore;
use std::sync::Arc;

pub const CREATED_MESSAGE: &str = "Запись создана";
pub const UPDATED_MESSAGE: &str = "Запись обновлена";
pub const DELETED_MESSAGE: &str = "Запись удалена";

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    /// All cats with their breed. An empty catalog is NotFound.
    pub async fn list_cats(&self) -> Result<Vec<Cat>, AppError> {
        let cats = self.store.list_cats().await?;
        if cats.is_empty() {
            return Err(AppError::NotFound("Котята не найдены.".into()));
        }
        Ok(cats)
    }

    /// All breeds. No breeds is NotFound.
    pub async fn list_breeds(&self) -> Result<Vec<Breed>, AppError> {
        let breeds = self.store.list_breeds().await?;
        if breeds.is_empty() {
            return Err(AppError::NotFound("Породы отсутствуют.".into()));
        }
        Ok(breeds)
    }

    pub async fn list_cats_by_breed(&self, breed_name: &str) -> Result<Vec<Cat>, AppError> {
        let cats = self.store.list_cats_by_breed(breed_name).await?;
        if cats.is_empty() {
            return Err(AppError::NotFound(format!("Котята породы '{}' не найдены.", breed_name)));
        }
        Ok(cats)
    }

    pub async fn get_cat(&self, cat_id: i32) -> Result<Cat, AppError> {
        self.store
            .get_cat(cat_id)
            .await?
            .ok_or_else(|| cat_not_found(cat_id))
    }

    pub async fn create_cat(&self, data: &CatData) -> Result<StatusMessage, AppError> {
        RequestValidator::validate_cat(data)?;
        let id = self.store.insert_cat(data).await?;
        tracing::info!(cat_id = id, breed_id = data.breed_id, "cat created");
        Ok(StatusMessage::success(CREATED_MESSAGE))
    }

    /// Replaces every field of the cat with `data`.
    pub async fn update_cat(&self, cat_id: i32, data: &CatData) -> Result<StatusMessage, AppError> {
        RequestValidator::validate_cat(data)?;
        match self.store.update_cat(cat_id, data).await? {
            WriteOutcome::Applied => {
                tracing::info!(cat_id, "cat updated");
                Ok(StatusMessage::success(UPDATED_MESSAGE))
            }
            WriteOutcome::NotFound => {
                tracing::warn!(cat_id, "update of missing cat");
                Err(cat_not_found(cat_id))
            }
        }
    }

    pub async fn delete_cat(&self, cat_id: i32) -> Result<StatusMessage, AppError> {
        match self.store.delete_cat(cat_id).await? {
            WriteOutcome::Applied => {
                tracing::info!(cat_id, "cat deleted");
                Ok(StatusMessage::success(DELETED_MESSAGE))
            }
            WriteOutcome::NotFound => {
                tracing::warn!(cat_id, "delete of missing cat");
                Err(cat_not_found(cat_id))
            }
        }
    }

    pub async fn create_breed(&self, data: &BreedData) -> Result<Breed, AppError> {
        RequestValidator::validate_breed(data)?;
        let breed = self.store.insert_breed(data).await?;
        tracing::info!(breed_id = breed.id, "breed created");
        Ok(breed)
    }
}

fn cat_not_found(cat_id: i32) -> AppError {
    AppError::NotFound(format!("Котёнок с id {} не найден.", cat_id))
}
