//! Per-user feature vote model and DTOs.

use accessmap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `feature_confirmations` table.
///
/// `is_good` is tri-state: `Some(true)` thumbs-up, `Some(false)`
/// thumbs-down, `None` no opinion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeatureConfirmation {
    pub id: DbId,
    pub user_id: DbId,
    pub location_id: DbId,
    pub feature_id: DbId,
    pub is_good: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for recording a vote. A missing or `null` `is_good`
/// clears the user's opinion without deleting the row.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertFeatureConfirmation {
    #[serde(default)]
    pub is_good: Option<bool>,
}
