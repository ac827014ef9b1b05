//! HTTP-level tests for footprint previews and land views.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, user_token, UNREACHABLE_BACKEND};

fn round5(v: f64) -> f64 {
    (v * 100_000.0).round() / 100_000.0
}

#[tokio::test]
async fn footprint_preview_returns_square_corners() {
    let app = common::build_test_app(UNREACHABLE_BACKEND);
    let response = get_auth(
        app,
        "/api/v1/footprint?lat=40&lng=-75&area=400",
        &user_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["area_sq_m"], 400.0);
    assert!(data["location"].is_null());

    let corners = data["footprint"]["corners"].as_array().unwrap();
    let expected = [
        (40.00009, -75.00012),
        (40.00009, -74.99988),
        (39.99991, -74.99988),
        (39.99991, -75.00012),
    ];
    for (corner, (lat, lng)) in corners.iter().zip(expected) {
        assert_eq!(round5(corner["lat"].as_f64().unwrap()), lat);
        assert_eq!(round5(corner["lng"].as_f64().unwrap()), lng);
    }

    let ring = data["geojson"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);

    let bounds = data["bounds"].as_array().unwrap();
    assert_eq!(bounds.len(), 2);
    assert_eq!(bounds[0], corners[0]);
    assert_eq!(bounds[1], corners[2]);
}

#[tokio::test]
async fn footprint_preview_defaults_missing_area() {
    let app = common::build_test_app(UNREACHABLE_BACKEND);
    let response = get_auth(app, "/api/v1/footprint?lat=0&lng=0", &user_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["area_sq_m"], 100.0);
}

#[tokio::test]
async fn footprint_preview_rejects_out_of_range_latitude() {
    let app = common::build_test_app(UNREACHABLE_BACKEND);
    let response = get_auth(app, "/api/v1/footprint?lat=91&lng=0", &user_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn footprint_preview_geocodes_to_unknown_without_api_key() {
    let app = common::build_test_app(UNREACHABLE_BACKEND);
    let response = get_auth(
        app,
        "/api/v1/footprint?lat=40&lng=-75&geocode=true",
        &user_token(),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["location"], "Unknown");
}

#[tokio::test]
async fn footprint_preview_requires_session() {
    let app = common::build_test_app(UNREACHABLE_BACKEND);
    let response = get(app, "/api/v1/footprint?lat=40&lng=-75").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn land_preview_uses_stored_coordinates() {
    let backend = common::serve(common::mock_backend()).await;
    let app = common::build_test_app(&backend);
    let response = get_auth(app, "/api/v1/lands/7/preview", &user_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["center"]["lat"], 40.0);
    assert_eq!(json["data"]["center"]["lng"], -75.0);
    assert_eq!(
        json["data"]["location"],
        "Springfield, Pennsylvania, United States"
    );
}

#[tokio::test]
async fn land_preview_with_bad_coordinates_is_validation_error() {
    let backend = common::serve(common::mock_backend()).await;
    let app = common::build_test_app(&backend);
    let response = get_auth(app, "/api/v1/lands/13/preview", &user_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_land_is_not_found() {
    let backend = common::serve(common::mock_backend()).await;
    let app = common::build_test_app(&backend);
    let response = get_auth(app, "/api/v1/lands/404", &user_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "land with id 404 not found");
}

#[tokio::test]
async fn owner_lands_carry_footprints() {
    let backend = common::serve(common::mock_backend()).await;
    let app = common::build_test_app(&backend);
    let response = get_auth(app, "/api/v1/owners/3/lands", &user_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let lands = json["data"].as_array().unwrap();
    assert_eq!(lands.len(), 2);
    assert_eq!(lands[0]["id"], 1);
    assert_eq!(lands[0]["footprint"]["corners"].as_array().unwrap().len(), 4);
    assert!(lands[1]["footprint"].is_null());
}
