//! Handlers for the `/features` catalog.

use accessmap_db::models::feature::Feature;
use accessmap_db::repositories::FeatureRepo;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// A catalog feature annotated with whether users may vote on it.
#[derive(Debug, Serialize)]
pub struct FeatureView {
    #[serde(flatten)]
    pub feature: Feature,
    pub is_trackable: bool,
}

/// GET /api/v1/features
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<FeatureView>>>> {
    let excluded = &state.config.excluded_features;
    let features = FeatureRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|feature| FeatureView {
            is_trackable: !excluded.contains(feature.id),
            feature,
        })
        .collect();
    Ok(Json(DataResponse { data: features }))
}
