//! Repository for the `locations` table.

use accessmap_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use accessmap_core::status::AccessLevel;
use accessmap_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location, LocationListParams, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, description, latitude, longitude, \
                       access_level_id, is_auto_status, created_by, created_at, updated_at";

/// Provides CRUD operations for locations plus the classifier write.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    ///
    /// `access_level_id` defaults to 4 (Unknown) and `is_auto_status`
    /// to `true` when omitted.
    pub async fn create(
        pool: &PgPool,
        created_by: Option<DbId>,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations
                (name, category, description, latitude, longitude,
                 access_level_id, is_auto_status, created_by)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 4), COALESCE($7, TRUE), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.name.trim())
            .bind(input.category.trim())
            .bind(&input.description)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.access_level_id)
            .bind(input.is_auto_status)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List locations newest first, optionally filtered by category and
    /// access level. Limit and offset are clamped.
    pub async fn list(
        pool: &PgPool,
        params: &LocationListParams,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::SMALLINT IS NULL OR access_level_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&params.category)
            .bind(params.access_level_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a location. Only non-`None` fields in `input` are applied;
    /// `description: Some(None)` clears the description.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = CASE WHEN $9 THEN $4 ELSE description END,
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                access_level_id = COALESCE($7, access_level_id),
                is_auto_status = COALESCE($8, is_auto_status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let description_provided = input.description.is_some();
        let description = input.description.as_ref().and_then(|d| d.as_deref());

        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.category.as_deref().map(str::trim))
            .bind(description)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.access_level_id)
            .bind(input.is_auto_status)
            .bind(description_provided)
            .fetch_optional(pool)
            .await
    }

    /// Delete a location and, by cascade, its confirmations.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a classifier result for a location in automatic-status mode.
    ///
    /// Rows with `is_auto_status = FALSE` are never touched, and a row
    /// already holding `level` is left as is. Returns `true` only when
    /// the stored value changed.
    pub async fn set_auto_access_level(
        pool: &PgPool,
        id: DbId,
        level: AccessLevel,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE locations SET access_level_id = $2
             WHERE id = $1
               AND is_auto_status = TRUE
               AND access_level_id IS DISTINCT FROM $2",
        )
        .bind(id)
        .bind(level.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
