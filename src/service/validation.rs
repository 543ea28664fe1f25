//! Field rules checked before anything reaches the store.

use crate::error::AppError;
use crate::model::{BreedData, CatData, NAME_MAX_LEN};

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_cat(data: &CatData) -> Result<(), AppError> {
        validate_name("color", &data.color)?;
        if data.age_in_months <= 0 {
            return Err(AppError::Validation("age_in_months must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn validate_breed(data: &BreedData) -> Result<(), AppError> {
        validate_name("name", &data.name)
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, NAME_MAX_LEN
        )));
    }
    Ok(())
}
