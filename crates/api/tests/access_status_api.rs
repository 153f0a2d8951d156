//! HTTP-level integration tests for vote recording and access-status
//! classification.

mod common;

use accessmap_api::handlers::confirmation::vote_error;
use accessmap_db::repositories::FeatureConfirmationRepo;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use common::{
    admin_token, body_json, cast_votes, create_location, get, get_auth, location_body, post_json,
    put_json, send, user_token, vote, TRACKABLE,
};
use serde_json::json;
use sqlx::PgPool;

async fn recompute(pool: &PgPool, location_id: i64) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/locations/{location_id}/access-status"),
        &user_token(99),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["status"].as_i64().unwrap()
}

async fn stored_level(pool: &PgPool, location_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/locations/{location_id}")).await).await;
    json["access_level_id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Classification scenarios
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn location_without_votes_is_unknown(pool: PgPool) {
    let id = create_location(&pool, location_body("Quiet corner")).await;

    assert_eq!(recompute(&pool, id).await, 4);
    assert_eq!(stored_level(&pool, id).await, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn all_features_positive_is_easy(pool: PgPool) {
    let id = create_location(&pool, location_body("Library")).await;
    for feature_id in TRACKABLE {
        cast_votes(&pool, id, feature_id, 3, 0).await;
    }

    assert_eq!(recompute(&pool, id).await, 1);
    assert_eq!(stored_level(&pool, id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_negative_feature_is_medium(pool: PgPool) {
    let id = create_location(&pool, location_body("Bistro")).await;
    cast_votes(&pool, id, TRACKABLE[0], 1, 3).await;
    for &feature_id in &TRACKABLE[1..] {
        cast_votes(&pool, id, feature_id, 3, 0).await;
    }

    assert_eq!(recompute(&pool, id).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_negative_features_is_hard(pool: PgPool) {
    let id = create_location(&pool, location_body("Old town hall")).await;
    for &feature_id in &TRACKABLE[..5] {
        cast_votes(&pool, id, feature_id, 0, 2).await;
    }
    for &feature_id in &TRACKABLE[5..] {
        cast_votes(&pool, id, feature_id, 2, 0).await;
    }

    assert_eq!(recompute(&pool, id).await, 3);
    assert_eq!(stored_level(&pool, id).await, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_response_carries_new_status(pool: PgPool) {
    let id = create_location(&pool, location_body("Bakery")).await;

    let response = vote(&pool, 7, id, 1, Some(false)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["confirmation"]["user_id"], 7);
    assert_eq!(json["data"]["confirmation"]["is_good"], false);
    assert_eq!(json["data"]["status"], 2);
    assert_eq!(stored_level(&pool, id).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_is_idempotent(pool: PgPool) {
    let id = create_location(&pool, location_body("Gallery")).await;
    cast_votes(&pool, id, 2, 0, 1).await;

    let first = recompute(&pool, id).await;
    let second = recompute(&pool, id).await;
    assert_eq!(first, second);
    assert_eq!(stored_level(&pool, id).await, first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_override_is_respected(pool: PgPool) {
    let id = create_location(
        &pool,
        json!({
            "name": "Ferry terminal",
            "category": "transit",
            "latitude": 54.3,
            "longitude": 10.1,
            "access_level_id": 3,
            "is_auto_status": false,
        }),
    )
    .await;
    for feature_id in TRACKABLE {
        cast_votes(&pool, id, feature_id, 2, 0).await;
    }

    // The classifier still reports what the votes say ...
    assert_eq!(recompute(&pool, id).await, 1);
    // ... but the stored level stays at the manual value.
    assert_eq!(stored_level(&pool, id).await, 3);
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_on_excluded_feature_returns_400(pool: PgPool) {
    let id = create_location(&pool, location_body("Market")).await;

    let response = vote(&pool, 7, id, 8, Some(true)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_on_unknown_feature_or_location_returns_404(pool: PgPool) {
    let id = create_location(&pool, location_body("Market")).await;

    let response = vote(&pool, 7, id, 4242, Some(true)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = vote(&pool, 7, 999_999, 1, Some(true)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_on_location_deleted_mid_request_is_not_found(pool: PgPool) {
    let id = create_location(&pool, location_body("Kiosk")).await;
    let app = common::build_test_app(pool.clone());
    let response = common::delete(app, &format!("/api/v1/locations/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The insert races the delete and trips the location foreign key.
    let err = FeatureConfirmationRepo::upsert(&pool, 7, id, 1, Some(true))
        .await
        .unwrap_err();
    let response = vote_error(err, id).into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Location with id {id} not found"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vote_requires_a_token(pool: PgPool) {
    let id = create_location(&pool, location_body("Market")).await;

    let response = send(
        common::build_test_app(pool),
        Method::PUT,
        &format!("/api/v1/locations/{id}/features/1/confirmation"),
        None,
        Some(json!({"is_good": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revote_overwrites_and_null_clears(pool: PgPool) {
    let id = create_location(&pool, location_body("Cinema")).await;

    vote(&pool, 7, id, 5, Some(true)).await;
    vote(&pool, 7, id, 5, Some(false)).await;
    let response = vote(&pool, 7, id, 5, None).await;
    let json = body_json(response).await;
    assert!(json["data"]["confirmation"]["is_good"].is_null());
    // The only vote was withdrawn, so nothing is known any more.
    assert_eq!(json["data"]["status"], 4);

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(
            app,
            &format!("/api/v1/locations/{id}/confirmations/mine"),
            &user_token(7),
        )
        .await,
    )
    .await;
    let mine = json["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["feature_id"], 5);
}

// ---------------------------------------------------------------------------
// Tallies and trigger endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn tallies_include_unvoted_features(pool: PgPool) {
    let id = create_location(&pool, location_body("Pool")).await;
    cast_votes(&pool, id, 10, 2, 1).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/locations/{id}/feature-tallies")).await).await;
    let tallies = json["data"].as_array().unwrap();

    let ids: Vec<i64> = tallies
        .iter()
        .map(|t| t["feature_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, TRACKABLE);

    for tally in tallies {
        let (up, down) = if tally["feature_id"] == 10 { (2, 1) } else { (0, 0) };
        assert_eq!(tally["thumbs_up_count"], up);
        assert_eq!(tally["thumbs_down_count"], down);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_unknown_location_returns_404(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/locations/999999/access-status",
        &user_token(1),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn re_enabling_auto_status_lets_classifier_write_again(pool: PgPool) {
    let id = create_location(&pool, location_body("Stadium")).await;
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/locations/{id}"),
        &admin_token(),
        json!({"access_level_id": 3, "is_auto_status": false}),
    )
    .await;
    cast_votes(&pool, id, 1, 1, 0).await;
    assert_eq!(stored_level(&pool, id).await, 3);

    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/locations/{id}"),
        &admin_token(),
        json!({"is_auto_status": true}),
    )
    .await;

    assert_eq!(recompute(&pool, id).await, 2);
    assert_eq!(stored_level(&pool, id).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn switching_back_to_auto_status_reclassifies_immediately(pool: PgPool) {
    let id = create_location(
        &pool,
        json!({
            "name": "Concert hall",
            "category": "culture",
            "latitude": 54.3,
            "longitude": 10.1,
            "access_level_id": 3,
            "is_auto_status": false,
        }),
    )
    .await;
    for feature_id in TRACKABLE {
        cast_votes(&pool, id, feature_id, 3, 0).await;
    }
    assert_eq!(stored_level(&pool, id).await, 3);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/locations/{id}"),
        &admin_token(),
        json!({"is_auto_status": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_auto_status"], true);
    assert_eq!(json["access_level_id"], 1);

    // No explicit trigger call: the update itself stored the new level.
    assert_eq!(stored_level(&pool, id).await, 1);
}
