pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::analytics::handlers as analytics;
use crate::auth::{handlers as auth, require_auth};
use crate::models::portfolio::{GithubContributionRow, GithubProjectRow, GithubSkillRow, ResumeRow};
use crate::portfolio::{handlers as portfolio, Record};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Everything in here runs only after the bearer token has been verified.
    let protected = Router::new()
        .route("/api/protected", get(auth::handle_protected))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        // Authentication
        .route("/register", post(auth::handle_register))
        .route("/login", post(auth::handle_login))
        .merge(protected)
        // Portfolio records
        .merge(record_routes::<ResumeRow>("/resumes"))
        .merge(record_routes::<GithubProjectRow>("/github_projects"))
        .merge(record_routes::<GithubSkillRow>("/github_skills"))
        .merge(record_routes::<GithubContributionRow>("/github_contributions"))
        // Analytics placeholder
        .route("/api/ml/train", post(analytics::handle_train))
        .route("/api/ml/predict", post(analytics::handle_predict))
        .route(
            "/api/ml/analyze-driver/:driver_id",
            get(analytics::handle_analyze_driver),
        )
        .with_state(state)
}

/// `GET base/:id` lists by owning user id; `PUT`/`DELETE base/:id` address a
/// single record. The segment name is shared because the router cannot hold
/// two differently-named parameters at the same position.
fn record_routes<R: Record>(base: &str) -> Router<AppState> {
    Router::new().route(base, post(portfolio::handle_create::<R>)).route(
        &format!("{base}/:id"),
        get(portfolio::handle_list::<R>)
            .put(portfolio::handle_update::<R>)
            .delete(portfolio::handle_delete::<R>),
    )
}

/// Permissive when no origins are configured; otherwise only the listed
/// origins may call the API from a browser.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::auth::{SigningSecret, TokenService};
    use crate::store::UserIdentity;
    use crate::test_support::{
        empty_request, json_request, lazy_router as test_router, post_json, send, SECRET,
    };

    fn get_protected(auth_header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/protected");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register_and_login(app: &Router, email: &str, password: &str) -> String {
        let (status, _) = send(
            app,
            post_json(
                "/register",
                json!({"email": email, "password": password, "github_username": "octo"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            app,
            post_json("/login", json!({"email": email, "password": password})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_router();
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_returns_user_id() {
        let app = test_router();
        let (status, body) = send(
            &app,
            post_json(
                "/register",
                json!({"email": "ada@example.com", "password": "engine", "github_username": "ada"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["userId"].as_str().unwrap().parse::<Uuid>().is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_register_is_409() {
        let app = test_router();
        let payload = json!({"email": "dup@example.com", "password": "pw", "github_username": null});

        let (first, _) = send(&app, post_json("/register", payload.clone())).await;
        let (second, body) = send(&app, post_json("/register", payload)).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input_before_store() {
        let app = test_router();

        let (status, _) = send(
            &app,
            post_json("/register", json!({"email": "not-an-email", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            post_json("/register", json!({"email": "a@b.co", "password": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Missing field never deserializes.
        let (status, _) = send(&app, post_json("/register", json!({"email": "a@b.co"}))).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_login_and_access_protected_route() {
        let app = test_router();
        let token = register_and_login(&app, "grace@example.com", "cobol-1959").await;

        let (status, body) = send(&app, get_protected(Some(&format!("Bearer {token}")))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Protected route accessed successfully");
        assert_eq!(body["user"]["email"], "grace@example.com");
        assert!(body["user"]["userId"].is_string());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = test_router();
        register_and_login(&app, "bob@example.com", "right").await;

        let (wrong_pw, wrong_body) = send(
            &app,
            post_json("/login", json!({"email": "bob@example.com", "password": "wrong"})),
        )
        .await;
        let (no_user, no_user_body) = send(
            &app,
            post_json("/login", json!({"email": "eve@example.com", "password": "right"})),
        )
        .await;

        assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
        assert_eq!(no_user, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, no_user_body);
        assert!(wrong_body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_protected_without_token_is_401() {
        let app = test_router();
        let (status, body) = send(&app, get_protected(None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_protected_rejections_share_one_response() {
        let app = test_router();
        let tokens = TokenService::new(&SigningSecret::new(SECRET));
        let identity = UserIdentity {
            user_id: Uuid::new_v4(),
            email: "old@example.com".to_string(),
            password_hash: String::new(),
            github_username: None,
            created_at: Utc::now(),
        };
        let expired = tokens
            .issue_at(&identity, Utc::now() - Duration::hours(48))
            .unwrap();
        let forged = TokenService::new(&SigningSecret::new("someone-else"))
            .issue(&identity)
            .unwrap();

        let (missing_status, missing_body) = send(&app, get_protected(None)).await;
        for header_value in [
            format!("Bearer {expired}"),
            format!("Bearer {forged}"),
            "Bearer not.a.token".to_string(),
            format!("Basic {expired}"),
        ] {
            let (status, body) = send(&app, get_protected(Some(&header_value))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {header_value}");
            assert_eq!(body, missing_body);
        }
        assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ml_predict_before_training_fails() {
        let app = test_router();
        let (status, body) = send(
            &app,
            post_json("/api/ml/predict", json!({"raceData": [{"circuit_id": 7}]})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["message"], "Model not trained yet");
    }

    #[tokio::test]
    async fn test_ml_train_acknowledges_payload() {
        let app = test_router();
        let (status, body) = send(
            &app,
            post_json("/api/ml/train", json!({"historicalData": [{"race_result": 1}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"], 1);

        let (status, _) = send(&app, post_json("/api/ml/train", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_record_body_validated_before_store() {
        let app = test_router();
        let (status, body) = send(
            &app,
            post_json(
                "/github_skills",
                json!({"user_id": Uuid::new_v4(), "skill_name": "  ", "category": "lang"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_rejects_oversized_password() {
        let app = test_router();
        let (status, body) = send(
            &app,
            post_json(
                "/login",
                json!({"email": "big@example.com", "password": "x".repeat(1025)}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            post_json("/login", json!({"email": "  ", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn health_from(origin: &str) -> Request<Body> {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_allows_only_configured_origins() {
        let layer = cors_layer(&["https://resume.example.com".to_string()]).unwrap();
        let app = test_router().layer(layer);

        let allowed = app
            .clone()
            .oneshot(health_from("https://resume.example.com"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://resume.example.com"
        );

        let other = app.oneshot(health_from("https://evil.example.com")).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
        assert!(other
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_without_origins_is_permissive() {
        let app = test_router().layer(cors_layer(&[]).unwrap());
        let response = app.oneshot(health_from("https://anywhere.dev")).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_cors_rejects_unparseable_origin() {
        let origins = ["https://ok.example.com".to_string(), "bad\norigin".to_string()];
        assert!(cors_layer(&origins).is_err());
    }

    #[tokio::test]
    async fn test_record_update_validates_body() {
        let app = test_router();
        let (status, _) = send(
            &app,
            json_request(
                Method::PUT,
                &format!("/github_projects/{}", Uuid::new_v4()),
                json!({"user_id": Uuid::new_v4(), "project_name": "x", "relevance_score": 250.0}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            empty_request(Method::DELETE, "/github_skills/not-a-uuid"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
