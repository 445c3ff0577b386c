//! Analytics — pluggable scorer behind the `/api/ml/*` endpoints.
//!
//! No model ships with the service. `PlaceholderScorer` accepts payloads,
//! tracks whether training data has been seen, and otherwise reports that no
//! model backend is available. `AppState` holds an `Arc<dyn Scorer>` so a
//! real backend can be swapped in at startup without touching the handlers.

pub mod handlers;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Model not trained yet")]
    ModelNotTrained,

    #[error("No model backend available: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Scorer: Send + Sync {
    async fn train(&self, historical_data: &Value) -> Result<Value, ScoringError>;

    async fn predict(&self, race_data: &Value) -> Result<Value, ScoringError>;

    async fn analyze_driver(&self, history: &[Value]) -> Result<Value, ScoringError>;
}

#[derive(Debug, Default)]
pub struct PlaceholderScorer {
    /// Rows received by the most recent `train` call; zero means never trained.
    trained_rows: AtomicUsize,
}

impl PlaceholderScorer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Scorer for PlaceholderScorer {
    async fn train(&self, historical_data: &Value) -> Result<Value, ScoringError> {
        let rows = historical_data.as_array().ok_or_else(|| {
            ScoringError::InvalidPayload("historicalData must be an array".to_string())
        })?;
        if rows.is_empty() {
            return Err(ScoringError::InvalidPayload(
                "historicalData must not be empty".to_string(),
            ));
        }

        self.trained_rows.store(rows.len(), Ordering::SeqCst);
        info!("Placeholder scorer received {} training rows", rows.len());

        Ok(json!({
            "success": true,
            "message": "Training data received; no model backend is configured",
            "rows": rows.len(),
        }))
    }

    async fn predict(&self, race_data: &Value) -> Result<Value, ScoringError> {
        if race_data.is_null() {
            return Err(ScoringError::InvalidPayload("raceData is required".to_string()));
        }
        if self.trained_rows.load(Ordering::SeqCst) == 0 {
            return Err(ScoringError::ModelNotTrained);
        }
        Err(ScoringError::Unavailable(
            "prediction requires a model backend".to_string(),
        ))
    }

    async fn analyze_driver(&self, history: &[Value]) -> Result<Value, ScoringError> {
        Ok(json!({
            "success": true,
            "races": history.len(),
            "status": "placeholder",
        }))
    }
}
