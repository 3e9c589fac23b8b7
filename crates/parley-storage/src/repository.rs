//! SQLite-backed chat history repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use parley_core::{CapabilityError, ChatRecord, ChatRecorder, Intent, ParleyError};

use crate::db::Database;

/// Upper bound on rows returned by a single history query.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Repository for recorded question/answer exchanges.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    db: Arc<Database>,
}

impl ChatRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store one exchange. Records are written once and never updated.
    pub fn save(&self, record: &ChatRecord) -> Result<(), ParleyError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chat_records (id, user_id, message, response, intent, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    record.id.to_string(),
                    record.user_id,
                    record.message,
                    record.response,
                    record.intent.map(|i| i.as_str()),
                    record.timestamp.timestamp_millis(),
                ],
            )
            .map_err(|e| ParleyError::Storage(format!("Failed to save chat record: {}", e)))?;
            Ok(())
        })
    }

    /// Most recent exchanges for a user, newest first. `limit` is capped at
    /// [`MAX_HISTORY_LIMIT`].
    pub fn history(&self, user_id: &str, limit: u32) -> Result<Vec<ChatRecord>, ParleyError> {
        let limit = limit.min(MAX_HISTORY_LIMIT);

        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, user_id, message, response, intent, timestamp
                     FROM chat_records
                     WHERE user_id = ?1
                     ORDER BY timestamp DESC, rowid DESC
                     LIMIT ?2",
                )
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            let rows = stmt
                .query_map(rusqlite::params![user_id, limit], |row| {
                    Ok(row_to_record(row))
                })
                .map_err(|e| ParleyError::Storage(e.to_string()))?;

            let mut records = Vec::new();
            for row in rows {
                let record = row.map_err(|e| ParleyError::Storage(e.to_string()))??;
                records.push(record);
            }
            Ok(records)
        })
    }

    /// Total number of stored exchanges.
    pub fn count(&self) -> Result<u64, ParleyError> {
        self.db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM chat_records", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as u64)
            .map_err(|e| ParleyError::Storage(e.to_string()))
        })
    }
}

#[async_trait]
impl ChatRecorder for ChatRepository {
    fn is_ready(&self) -> bool {
        self.db.is_healthy()
    }

    async fn record_chat(&self, record: ChatRecord) -> Result<(), CapabilityError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.save(&record))
            .await
            .map_err(|e| CapabilityError::Unavailable(format!("recording task failed: {}", e)))?
            .map_err(|e| CapabilityError::Unavailable(e.to_string()))
    }
}

fn parse_intent(value: Option<String>) -> Result<Option<Intent>, ParleyError> {
    match value {
        None => Ok(None),
        Some(s) => Intent::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .map(Some)
            .ok_or_else(|| ParleyError::Storage(format!("Unknown intent: {}", s))),
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<ChatRecord, ParleyError> {
    let id_str: String = row
        .get(0)
        .map_err(|e| ParleyError::Storage(e.to_string()))?;
    let user_id: String = row
        .get(1)
        .map_err(|e| ParleyError::Storage(e.to_string()))?;
    let message: String = row
        .get(2)
        .map_err(|e| ParleyError::Storage(e.to_string()))?;
    let response: String = row
        .get(3)
        .map_err(|e| ParleyError::Storage(e.to_string()))?;
    let intent: Option<String> = row
        .get(4)
        .map_err(|e| ParleyError::Storage(e.to_string()))?;
    let timestamp_ms: i64 = row
        .get(5)
        .map_err(|e| ParleyError::Storage(e.to_string()))?;

    Ok(ChatRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| ParleyError::Storage(format!("Invalid UUID: {}", e)))?,
        user_id,
        message,
        response,
        intent: parse_intent(intent)?,
        timestamp: Utc
            .timestamp_millis_opt(timestamp_ms)
            .single()
            .unwrap_or_default(),
    })
}
