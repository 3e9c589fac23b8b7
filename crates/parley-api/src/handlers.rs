//! Route handlers for the chat, health, and history endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_core::{ChatRecord, Intent};
use parley_storage::repository::MAX_HISTORY_LIMIT;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Request body for POST /api/chat.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

/// Response body for POST /api/chat.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// Only present in rule-routed mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mode: String,
    pub uptime_secs: u64,
    pub database_ready: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub message: String,
    pub response: String,
    pub intent: Option<Intent>,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatRecord> for HistoryEntry {
    fn from(record: ChatRecord) -> Self {
        Self {
            id: record.id,
            message: record.message,
            response: record.response,
            intent: record.intent,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub user_id: String,
    pub entries: Vec<HistoryEntry>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/chat - answer one message.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body?;

    let answer = state
        .orchestrator
        .produce_answer(request.message.as_deref(), request.user_id.as_deref())
        .await?;

    Ok(Json(ChatResponse {
        response: answer.text,
        intent: answer.intent,
    }))
}

/// GET /api/health - liveness plus pipeline and storage status.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: state.orchestrator.mode().as_str().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        database_ready: state.orchestrator.recorder_ready(),
    })
}

/// GET /api/history/{user_id}?limit=N - most recent exchanges, newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let repo = state
        .history
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("chat history is not available".into()))?;

    let limit = params
        .limit
        .unwrap_or(state.config.storage.history_limit)
        .min(MAX_HISTORY_LIMIT);

    let repo = repo.clone();
    let lookup_user = user_id.clone();
    let records = tokio::task::spawn_blocking(move || repo.history(&lookup_user, limit))
        .await
        .map_err(|e| ApiError::Internal(format!("History task failed: {}", e)))??;

    Ok(Json(HistoryResponse {
        user_id,
        entries: records.into_iter().map(HistoryEntry::from).collect(),
    }))
}
