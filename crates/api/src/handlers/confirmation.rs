//! Handlers for recording feature votes.

use accessmap_core::error::CoreError;
use accessmap_core::status::StatusId;
use accessmap_core::types::DbId;
use accessmap_db::models::feature_confirmation::{
    FeatureConfirmation, UpsertFeatureConfirmation,
};
use accessmap_db::repositories::{FeatureConfirmationRepo, FeatureRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::access_status::{load_location, recompute};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A stored vote together with the access level it produced.
#[derive(Debug, Serialize)]
pub struct VoteResult {
    pub confirmation: FeatureConfirmation,
    pub status: StatusId,
}

/// Map a failed vote insert to an API error.
///
/// The location is checked before the insert, but it can be deleted in
/// between; the resulting foreign-key violation is reported as the
/// missing location rather than a bad reference.
pub fn vote_error(err: sqlx::Error, location_id: DbId) -> AppError {
    let location_gone = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        == Some("fk_feature_confirmations_location");
    if location_gone {
        AppError::Core(CoreError::NotFound {
            entity: "Location",
            id: location_id,
        })
    } else {
        AppError::Database(err)
    }
}

/// PUT /api/v1/locations/{id}/features/{feature_id}/confirmation
///
/// Record the caller's vote, then recompute the location's access level.
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((location_id, feature_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpsertFeatureConfirmation>,
) -> AppResult<Json<DataResponse<VoteResult>>> {
    let location = load_location(&state.pool, location_id).await?;

    FeatureRepo::find_by_id(&state.pool, feature_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Feature",
            id: feature_id,
        }))?;

    if state.config.excluded_features.contains(feature_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Feature {feature_id} does not accept votes"
        ))));
    }

    let confirmation = FeatureConfirmationRepo::upsert(
        &state.pool,
        auth.user_id,
        location_id,
        feature_id,
        input.is_good,
    )
    .await
    .map_err(|err| vote_error(err, location_id))?;

    tracing::info!(
        user_id = auth.user_id,
        location_id,
        feature_id,
        is_good = ?input.is_good,
        "Feature confirmation recorded"
    );

    let level = recompute(&state.pool, &state.config.excluded_features, &location).await?;

    Ok(Json(DataResponse {
        data: VoteResult {
            confirmation,
            status: level.id(),
        },
    }))
}

/// GET /api/v1/locations/{id}/confirmations/mine
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(location_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FeatureConfirmation>>>> {
    load_location(&state.pool, location_id).await?;
    let confirmations =
        FeatureConfirmationRepo::list_for_user_at_location(&state.pool, auth.user_id, location_id)
            .await?;
    Ok(Json(DataResponse {
        data: confirmations,
    }))
}
