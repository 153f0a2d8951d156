//! Validation rules for location records.

use crate::error::CoreError;
use crate::status::{AccessLevel, StatusId};

/// Maximum length of a location name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a location category label.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Validate a location name: non-blank and at most [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Location name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Location name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if category.trim().is_empty() {
        return Err(CoreError::Validation(
            "Location category must not be empty".into(),
        ));
    }
    if category.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Location category must be at most {MAX_CATEGORY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate WGS84 coordinates.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "Latitude {latitude} is out of range [-90, 90]"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "Longitude {longitude} is out of range [-180, 180]"
        )));
    }
    Ok(())
}

/// Validate that an access level id refers to a seeded access level.
pub fn validate_access_level_id(id: StatusId) -> Result<AccessLevel, CoreError> {
    AccessLevel::from_id(id).ok_or_else(|| {
        CoreError::Validation(format!("Invalid access level id {id}. Must be 1-4"))
    })
}
