// src/api/handlers.rs
// HTTP handlers: thin wrappers that decode the request shape and hand
// off to the dispatch engine or the history reader.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{self, Outcome};
use crate::error::{CalcError, CalcResult};
use crate::state::AppState;
use crate::store::{Category, HistoryEntry, StoreSelector};

#[derive(Serialize)]
pub struct SizeResponse {
    pub size: usize,
}

/// GET /calculator/health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.primary.ping().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "primary store unreachable")
    }
}

/// GET /calculator/stack/size
pub async fn stack_size(State(state): State<Arc<AppState>>) -> Json<SizeResponse> {
    let size = state.stack.lock().await.len();
    Json(SizeResponse { size })
}

#[derive(Deserialize)]
pub struct ArgumentsBody {
    #[serde(default)]
    arguments: Option<Value>,
}

/// PUT /calculator/stack/arguments
pub async fn push_arguments(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ArgumentsBody>,
) -> CalcResult<Json<SizeResponse>> {
    let values = engine::parse_operands(body.arguments.as_ref())?;
    let mut stack = state.stack.lock().await;
    stack.push_all(&values);
    Ok(Json(SizeResponse { size: stack.len() }))
}

#[derive(Deserialize)]
pub struct RemoveQuery {
    count: Option<i64>,
}

/// DELETE /calculator/stack/arguments?count=N
pub async fn remove_arguments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RemoveQuery>,
) -> CalcResult<Json<SizeResponse>> {
    let count = query.count.unwrap_or(1);
    if count < 0 {
        return Err(CalcError::InvalidArgumentShape(format!(
            "Error: count must not be negative, got {count}"
        )));
    }
    let count = count as usize;

    let mut stack = state.stack.lock().await;
    let available = stack.len();
    let size = stack
        .remove_top(count)
        .ok_or_else(|| CalcError::cannot_remove(count, available))?;
    Ok(Json(SizeResponse { size }))
}

#[derive(Deserialize)]
pub struct OperateQuery {
    operation: Option<String>,
}

/// GET /calculator/stack/operate?operation=name
pub async fn operate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OperateQuery>,
) -> CalcResult<Json<Outcome>> {
    let name = query.operation.unwrap_or_default();
    let outcome = engine::operate(&state, &name).await?;
    Ok(Json(outcome))
}

#[derive(Deserialize)]
pub struct CalculateBody {
    #[serde(default)]
    operation: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
}

/// POST /calculator/independent/calculate
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CalculateBody>,
) -> CalcResult<Json<Outcome>> {
    let name = body.operation.unwrap_or_default();
    let outcome = engine::calculate(&state, &name, body.arguments.as_ref()).await?;
    Ok(Json(outcome))
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    store: Option<String>,
    category: Option<String>,
}

/// GET /calculator/history?store=PRIMARY|SECONDARY[&category=...]
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> CalcResult<Json<Vec<HistoryEntry>>> {
    let raw = query.store.unwrap_or_default();
    let selector = StoreSelector::parse(&raw).ok_or(CalcError::InvalidSelector(raw))?;

    let filter = match query.category.as_deref() {
        None => None,
        Some(raw) => Some(Category::parse(raw).ok_or_else(|| {
            CalcError::InvalidArgumentShape(format!("Error: unknown category filter: {raw}"))
        })?),
    };

    let entries = state.history.history(selector, filter).await?;
    Ok(Json(entries))
}
