//! Route definitions for the `/locations` resource.
//!
//! Also nests the vote and access-status routes under `/locations/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{access_status, confirmation, location};
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /                                           -> list
/// POST   /                                           -> create
/// GET    /{id}                                       -> get_by_id
/// PUT    /{id}                                       -> update
/// DELETE /{id}                                       -> delete
///
/// POST   /{id}/access-status                         -> recompute_status
/// GET    /{id}/feature-tallies                       -> list_tallies
///
/// PUT    /{id}/features/{feature_id}/confirmation    -> upsert
/// GET    /{id}/confirmations/mine                    -> list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list).post(location::create))
        .route(
            "/{id}",
            get(location::get_by_id)
                .put(location::update)
                .delete(location::delete),
        )
        .route("/{id}/access-status", post(access_status::recompute_status))
        .route("/{id}/feature-tallies", get(access_status::list_tallies))
        .route(
            "/{id}/features/{feature_id}/confirmation",
            put(confirmation::upsert),
        )
        .route("/{id}/confirmations/mine", get(confirmation::list_mine))
}
