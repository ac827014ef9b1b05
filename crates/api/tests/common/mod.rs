#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::extract::Path;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, HeaderName, Method, Request, Response, StatusCode};
use axum::routing::{self, post, put};
use axum::{Json, Router};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use landreg_api::config::ServerConfig;
use landreg_api::routes;
use landreg_api::state::AppState;

/// Expiry far in the future (2100-01-01, seconds).
pub const FAR_FUTURE: i64 = 4_102_444_800;

/// Backend URL for tests that never reach the backend.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

/// Build a test `ServerConfig` pointing at `backend_url`.
pub fn test_config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_url: backend_url.to_string(),
        geocoder_url: "http://127.0.0.1:9/geocode".to_string(),
        geocoder_api_key: None,
        cookie_secure: false,
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(backend_url: &str) -> Router {
    let state = AppState::new(test_config(backend_url));

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::session::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Mint a JWT for `sub` expiring at `exp` (seconds).
pub fn token(sub: &str, exp: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": sub, "exp": exp }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

pub fn user_token() -> String {
    token("alice", FAR_FUTURE)
}

pub fn admin_token() -> String {
    token("root", FAR_FUTURE)
}

pub fn country_admin_token() -> String {
    token("claire", FAR_FUTURE)
}

pub fn expired_token() -> String {
    token("alice", 1_000_000)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with the session token in the `token` cookie.
pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, format!("theme=dark; token={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send `body` as JSON with `method`, authenticated by bearer `token`.
pub async fn send_json_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    body: Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn land_json(id: i64, coordinates: &str) -> Value {
    json!({
        "id": id,
        "location": "Springfield, Pennsylvania, United States",
        "locationCoordinates": coordinates,
        "surfaceArea": 400.0,
        "usageType": "Residential"
    })
}

/// A backend that knows one account (`alice` / `secret`), treats
/// [`admin_token`] as an admin, [`country_admin_token`] as a country admin
/// and [`user_token`] as a plain user.
pub fn mock_backend() -> Router {
    Router::new()
        .route(
            "/user/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    user_token()
                } else {
                    "fail".to_string()
                }
            }),
        )
        .route("/user/logout", post(|| async { StatusCode::OK }))
        .route(
            "/user/get-role",
            routing::get(|headers: HeaderMap| async move {
                match bearer(&headers) {
                    Some(t) if t == admin_token() => (StatusCode::OK, "ROLE_ADMIN"),
                    Some(t) if t == country_admin_token() => (StatusCode::OK, "ROLE_COUNTRY_ADMIN"),
                    Some(t) if t == user_token() => (StatusCode::OK, "ROLE_USER"),
                    _ => (StatusCode::UNAUTHORIZED, "unknown token"),
                }
            }),
        )
        .route(
            "/user/get-users",
            routing::get(|| async {
                Json(json!({
                    "content": [{ "id": 1, "username": "alice", "role": "ROLE_USER" }],
                    "totalPages": 1,
                    "totalElements": 1,
                    "number": 0
                }))
            }),
        )
        .route(
            "/land/get/{id}",
            routing::get(|Path(id): Path<i64>| async move {
                match id {
                    404 => Err((StatusCode::NOT_FOUND, "Land not found")),
                    13 => Ok(Json(land_json(id, "unknown"))),
                    _ => Ok(Json(land_json(id, "40.0, -75.0"))),
                }
            }),
        )
        .route(
            "/land-owner/lands/{id}",
            routing::get(|Path(_id): Path<i64>| async move {
                Json(json!([land_json(1, "40.0, -75.0"), land_json(2, "not a point")]))
            }),
        )
        .route(
            "/user/set-role/{id}/{role}",
            put(|Path((_id, role)): Path<(i64, String)>| async move {
                format!("Role updated to {role}")
            }),
        )
        .route(
            "/land-owner/add",
            post(|Json(body): Json<Value>| async move {
                if body["phoneNb"].is_string() && body["dateOfBirth"].is_string() {
                    (StatusCode::CREATED, "Land owner added")
                } else {
                    (StatusCode::BAD_REQUEST, "Missing owner fields")
                }
            }),
        )
        .route(
            "/land/surface-area-paged/{min}/{max}/{sort}",
            routing::get(|Path((min, max, sort)): Path<(f64, f64, String)>| async move {
                Json(json!({
                    "content": [land_json(min as i64, "40.0, -75.0"), land_json(max as i64, "0, 0")],
                    "totalPages": 1,
                    "totalElements": 2,
                    "number": 0,
                    "sort": sort
                }))
            }),
        )
        .route(
            "/user-log/records/{id}",
            routing::get(|Path(id): Path<i64>| async move {
                match id {
                    404 => Err((StatusCode::NOT_FOUND, "User not found")),
                    _ => Ok(Json(json!({
                        "content": [{ "username": format!("user{id}"), "action": "LOGIN" }],
                        "totalPages": 1
                    }))),
                }
            }),
        )
        .route(
            "/user-log/current-user",
            routing::get(|headers: HeaderMap| async move {
                let user = if bearer(&headers) == Some(user_token()) { "alice" } else { "other" };
                Json(json!({
                    "content": [{ "username": user, "action": "LOGIN" }],
                    "totalPages": 1
                }))
            }),
        )
        .route(
            "/user/change-password",
            put(|Json(body): Json<Value>| async move {
                if body["oldPassword"] == "secret" {
                    (StatusCode::OK, "Password changed")
                } else {
                    (StatusCode::BAD_REQUEST, "Old password is incorrect")
                }
            }),
        )
        .route(
            "/user/update-current-user",
            put(|Json(body): Json<Value>| async move {
                if body["username"] == "taken" {
                    (StatusCode::CONFLICT, "Username already exists")
                } else {
                    (StatusCode::OK, "Username updated")
                }
            }),
        )
}
