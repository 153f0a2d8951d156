//! Repository for the `features` catalog.

use accessmap_core::types::DbId;
use sqlx::PgPool;

use crate::models::feature::Feature;

const COLUMNS: &str = "id, name, description, sort_order, created_at, updated_at";

/// Read access to the feature catalog. The catalog is seeded by
/// migrations and not written through the API.
pub struct FeatureRepo;

impl FeatureRepo {
    /// List every catalog feature ordered by `sort_order`, then id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Feature>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM features ORDER BY sort_order, id");
        sqlx::query_as::<_, Feature>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Feature>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM features WHERE id = $1");
        sqlx::query_as::<_, Feature>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
