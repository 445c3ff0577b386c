//! Router fixtures shared by the handler tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tower::ServiceExt;
use uuid::Uuid;

use crate::analytics::PlaceholderScorer;
use crate::auth::{AuthService, PasswordHasher, SigningSecret, TokenService};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::MemoryCredentialStore;

pub const SECRET: &str = "router-test-secret";

/// Auth goes through the in-memory store; `db` only backs portfolio routes.
pub fn router_with_pool(db: PgPool) -> Router {
    let auth = AuthService::new(
        Arc::new(MemoryCredentialStore::new()),
        PasswordHasher::insecure_fast(),
        TokenService::new(&SigningSecret::new(SECRET)),
    )
    .unwrap();
    build_router(AppState {
        db,
        auth,
        scorer: Arc::new(PlaceholderScorer::new()),
    })
}

/// The pool is never connected.
pub fn lazy_router() -> Router {
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/resume_api_test")
        .unwrap();
    router_with_pool(db)
}

/// Connects to `DATABASE_URL` and applies `schema.sql`. `None` when the
/// variable is unset so database tests skip on machines without Postgres.
pub async fn database() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("DATABASE_URL is set but unreachable");

    // Concurrent CREATE TABLE IF NOT EXISTS can still collide in the catalog.
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("SELECT pg_advisory_xact_lock(7031)")
        .execute(&mut *tx)
        .await
        .unwrap();
    (&mut *tx)
        .execute(include_str!("../schema.sql"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    Some(pool)
}

/// Inserts a bare user row so portfolio records have an owner.
pub async fn seed_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (user_id, email, password_hash) VALUES ($1, $2, 'unused')")
        .bind(user_id)
        .bind(format!("{user_id}@example.com"))
        .execute(pool)
        .await
        .unwrap();
    user_id
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    json_request(Method::POST, uri, body)
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
