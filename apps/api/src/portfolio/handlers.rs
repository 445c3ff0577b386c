use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{delete, list_for_user, Record};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /<kind>/:user_id
pub async fn handle_list<R: Record>(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<R>>, AppError> {
    let rows = list_for_user::<R>(&state.db, user_id).await?;
    Ok(Json(rows))
}

/// POST /<kind>
///
/// Responds with the submitted body plus the id the row was stored under.
pub async fn handle_create<R: Record>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let input: R::Input =
        serde_json::from_value(body.clone()).map_err(|e| AppError::Validation(e.to_string()))?;
    R::validate(&input).map_err(AppError::Validation)?;
    let row = R::insert(&state.db, &input).await?;
    Ok(Json(with_id(row.id(), body)))
}

/// The stored id wins over any `id` the client sent.
fn with_id(id: Uuid, body: Value) -> Value {
    let mut fields = match body {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    fields.insert("id".to_string(), json!(id));
    Value::Object(fields)
}

/// PUT /<kind>/:id
pub async fn handle_update<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<R::Input>,
) -> Result<Json<R>, AppError> {
    R::validate(&input).map_err(AppError::Validation)?;
    let row = R::update(&state.db, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", R::LABEL)))?;
    Ok(Json(row))
}

/// DELETE /<kind>/:id
pub async fn handle_delete<R: Record>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if !delete::<R>(&state.db, id).await? {
        return Err(AppError::NotFound(format!("{} {id} not found", R::LABEL)));
    }
    Ok(Json(json!({ "message": format!("{} deleted", R::LABEL) })))
}
