//! Repository for the `feature_confirmations` table.
//!
//! Also hosts the per-location vote aggregate that feeds the access-level
//! classifier in `accessmap_core::access_status`.

use accessmap_core::access_status::{ExcludedFeatures, FeatureTally};
use accessmap_core::types::DbId;
use sqlx::PgPool;

use crate::models::feature_confirmation::FeatureConfirmation;

const COLUMNS: &str = "id, user_id, location_id, feature_id, is_good, created_at, updated_at";

/// Provides vote persistence and aggregation.
pub struct FeatureConfirmationRepo;

impl FeatureConfirmationRepo {
    /// Record a user's vote on one feature of one location.
    ///
    /// A second vote by the same user on the same (location, feature)
    /// overwrites the first.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        location_id: DbId,
        feature_id: DbId,
        is_good: Option<bool>,
    ) -> Result<FeatureConfirmation, sqlx::Error> {
        let query = format!(
            "INSERT INTO feature_confirmations (user_id, location_id, feature_id, is_good) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, location_id, feature_id) \
             DO UPDATE SET is_good = EXCLUDED.is_good \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FeatureConfirmation>(&query)
            .bind(user_id)
            .bind(location_id)
            .bind(feature_id)
            .bind(is_good)
            .fetch_one(pool)
            .await
    }

    /// List one user's votes at a location, ordered by feature id.
    pub async fn list_for_user_at_location(
        pool: &PgPool,
        user_id: DbId,
        location_id: DbId,
    ) -> Result<Vec<FeatureConfirmation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feature_confirmations \
             WHERE user_id = $1 AND location_id = $2 \
             ORDER BY feature_id"
        );
        sqlx::query_as::<_, FeatureConfirmation>(&query)
            .bind(user_id)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Aggregate thumbs-up/down counts per trackable feature for a location.
    ///
    /// Every catalog feature not in `excluded` yields exactly one tally,
    /// ordered by feature id. Features nobody voted on come back as
    /// `0 / 0` through the outer join; `NULL` votes count on neither side.
    pub async fn tally_for_location(
        pool: &PgPool,
        location_id: DbId,
        excluded: &ExcludedFeatures,
    ) -> Result<Vec<FeatureTally>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (DbId, i64, i64)>(
            "SELECT f.id, \
                    COUNT(fc.id) FILTER (WHERE fc.is_good = TRUE), \
                    COUNT(fc.id) FILTER (WHERE fc.is_good = FALSE) \
             FROM features f \
             LEFT JOIN feature_confirmations fc \
                    ON fc.feature_id = f.id AND fc.location_id = $1 \
             WHERE NOT (f.id = ANY($2)) \
             GROUP BY f.id \
             ORDER BY f.id",
        )
        .bind(location_id)
        .bind(excluded.as_slice())
        .fetch_all(pool)
        .await?;

        tracing::debug!(location_id, features = rows.len(), "Tallied feature confirmations");

        Ok(rows
            .into_iter()
            .map(|(feature_id, up, down)| FeatureTally::new(feature_id, up, down))
            .collect())
    }
}
