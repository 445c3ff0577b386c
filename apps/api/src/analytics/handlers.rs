use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    #[serde(default)]
    pub historical_data: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    pub race_data: Value,
}

/// POST /api/ml/train
pub async fn handle_train(
    State(state): State<AppState>,
    Json(req): Json<TrainRequest>,
) -> Result<Json<Value>, AppError> {
    let result = state.scorer.train(&req.historical_data).await?;
    Ok(Json(result))
}

/// POST /api/ml/predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<Value>, AppError> {
    let result = state.scorer.predict(&req.race_data).await?;
    Ok(Json(result))
}

/// GET /api/ml/analyze-driver/:driver_id
pub async fn handle_analyze_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let history: Vec<Value> =
        sqlx::query_scalar("SELECT to_jsonb(r) FROM race_results r WHERE r.driver_id = $1")
            .bind(driver_id)
            .fetch_all(&state.db)
            .await?;

    let analysis = state.scorer.analyze_driver(&history).await?;
    Ok(Json(analysis))
}
