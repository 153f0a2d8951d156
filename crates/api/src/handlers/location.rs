//! Handlers for the `/locations` resource.

use accessmap_core::error::CoreError;
use accessmap_core::location::{
    validate_access_level_id, validate_category, validate_coordinates, validate_name,
};
use accessmap_core::types::DbId;
use accessmap_db::models::location::{
    CreateLocation, Location, LocationListParams, UpdateLocation,
};
use accessmap_db::repositories::LocationRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::access_status::{load_location, recompute};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_create(input: &CreateLocation) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    validate_category(&input.category)?;
    validate_coordinates(input.latitude, input.longitude)?;
    if let Some(id) = input.access_level_id {
        validate_access_level_id(id)?;
    }
    Ok(())
}

/// Validate the fields present in a partial update. Coordinates are
/// checked against the stored value when only one of them changes.
fn validate_update(existing: &Location, input: &UpdateLocation) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    if input.latitude.is_some() || input.longitude.is_some() {
        validate_coordinates(
            input.latitude.unwrap_or(existing.latitude),
            input.longitude.unwrap_or(existing.longitude),
        )?;
    }
    if let Some(id) = input.access_level_id {
        validate_access_level_id(id)?;
    }
    Ok(())
}

/// POST /api/v1/locations
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    validate_create(&input)?;
    let location = LocationRepo::create(&state.pool, Some(admin.user_id), &input).await?;
    tracing::info!(
        user_id = admin.user_id,
        location_id = location.id,
        "Location created"
    );
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /api/v1/locations
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LocationListParams>,
) -> AppResult<Json<DataResponse<Vec<Location>>>> {
    let locations = LocationRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: locations }))
}

/// GET /api/v1/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Location>> {
    let location = load_location(&state.pool, id).await?;
    Ok(Json(location))
}

/// PUT /api/v1/locations/{id}
///
/// Setting `access_level_id` with `is_auto_status: false` is a manual
/// override; the classifier leaves such locations alone. Switching back
/// to automatic status reclassifies the location before responding.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let existing = load_location(&state.pool, id).await?;
    validate_update(&existing, &input)?;

    let location = LocationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    match (existing.is_auto_status, location.is_auto_status) {
        (true, false) => {
            tracing::info!(
                user_id = admin.user_id,
                location_id = id,
                access_level = location.access_level_id,
                "Location switched to manual access status"
            );
        }
        (false, true) => {
            tracing::info!(
                user_id = admin.user_id,
                location_id = id,
                "Location switched to automatic access status"
            );
            recompute(&state.pool, &state.config.excluded_features, &location).await?;
            let refreshed = load_location(&state.pool, id).await?;
            return Ok(Json(refreshed));
        }
        _ => {}
    }
    Ok(Json(location))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LocationRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = admin.user_id, location_id = id, "Location deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))
    }
}
