use std::sync::Arc;

use sqlx::PgPool;

use crate::analytics::Scorer;
use crate::auth::AuthService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Registration/login flow plus token verification for the auth gate.
    pub auth: AuthService,
    /// Pluggable analytics backend. Default: PlaceholderScorer.
    pub scorer: Arc<dyn Scorer>,
}
