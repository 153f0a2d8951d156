//! Location entity model and DTOs.

use accessmap_core::status::StatusId;
use accessmap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub access_level_id: StatusId,
    /// When `false` the access level is a manual override and the
    /// classifier leaves it alone.
    pub is_auto_status: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to 4 (Unknown) if omitted.
    pub access_level_id: Option<StatusId>,
    /// Defaults to `true` if omitted.
    pub is_auto_status: Option<bool>,
}

/// DTO for updating an existing location. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub category: Option<String>,
    /// Absent keeps the stored value; explicit `null` clears it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub access_level_id: Option<StatusId>,
    pub is_auto_status: Option<bool>,
}

/// Deserialize a field that is present in the body as `Some`, so an
/// explicit `null` becomes `Some(None)` rather than `None`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Filters for listing locations (`?category=&access_level_id=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationListParams {
    pub category: Option<String>,
    pub access_level_id: Option<StatusId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
