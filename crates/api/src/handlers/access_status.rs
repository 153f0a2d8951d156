//! Handlers for deriving a location's access level from its votes.
//!
//! [`recompute`] is the single aggregate-classify-persist pass. It runs
//! after every recorded vote and behind the explicit trigger endpoint.
//! The read and the write are separate statements; a vote that lands in
//! between is folded in by the recompute that vote itself triggers.

use accessmap_core::access_status::{classify, ExcludedFeatures, FeatureTally};
use accessmap_core::error::CoreError;
use accessmap_core::status::{AccessLevel, StatusId};
use accessmap_core::types::DbId;
use accessmap_db::models::location::Location;
use accessmap_db::repositories::{FeatureConfirmationRepo, LocationRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /locations/{id}/access-status`.
#[derive(Debug, Serialize)]
pub struct AccessStatusResponse {
    pub status: StatusId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusWrite {
    Updated,
    Unchanged,
    ManualOverride,
}

/// Aggregate the location's votes, classify them, and store the result
/// if the location is in automatic-status mode.
///
/// Returns the computed level even when a manual override prevented the
/// write.
pub async fn recompute(
    pool: &PgPool,
    excluded: &ExcludedFeatures,
    location: &Location,
) -> Result<AccessLevel, sqlx::Error> {
    let tallies = FeatureConfirmationRepo::tally_for_location(pool, location.id, excluded).await?;
    let level = classify(&tallies);

    let write = if !location.is_auto_status {
        StatusWrite::ManualOverride
    } else if LocationRepo::set_auto_access_level(pool, location.id, level).await? {
        StatusWrite::Updated
    } else {
        StatusWrite::Unchanged
    };

    tracing::info!(
        location_id = location.id,
        access_level = level.id(),
        previous_access_level = location.access_level_id,
        write = ?write,
        "Access status recomputed"
    );

    Ok(level)
}

pub(crate) async fn load_location(pool: &PgPool, id: DbId) -> AppResult<Location> {
    LocationRepo::find_by_id(pool, id).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Location",
            id,
        },
    ))
}

/// POST /api/v1/locations/{id}/access-status
pub async fn recompute_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AccessStatusResponse>> {
    let location = load_location(&state.pool, id).await?;
    let level = recompute(&state.pool, &state.config.excluded_features, &location).await?;
    Ok(Json(AccessStatusResponse { status: level.id() }))
}

/// GET /api/v1/locations/{id}/feature-tallies
pub async fn list_tallies(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FeatureTally>>>> {
    load_location(&state.pool, id).await?;
    let tallies =
        FeatureConfirmationRepo::tally_for_location(&state.pool, id, &state.config.excluded_features)
            .await?;
    Ok(Json(DataResponse { data: tallies }))
}
