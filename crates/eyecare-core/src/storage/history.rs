//! Append-only completion history.
//!
//! The whole history is one JSON array under a fixed kv key, newest first.
//! Two record shapes exist in the wild: with and without the `completed`
//! flag. Readers accept both; writers emit the flag. An absent, empty, or
//! malformed stored value reads as empty history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::database::Database;
use crate::error::StorageError;

/// Storage key for the history list.
pub const HISTORY_KEY: &str = "eye_care_history";

/// One completed session. References the exercise by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub exercise_id: String,
    /// Present in the newer record shape; older records omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl HistoryRecord {
    /// A completion record stamped now.
    pub fn completed_now(exercise_id: &str) -> Self {
        Self {
            date: Utc::now(),
            exercise_id: exercise_id.to_string(),
            completed: Some(true),
        }
    }
}

/// History access over the kv store.
pub struct HistoryStore<'a> {
    db: &'a Database,
}

impl<'a> HistoryStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Load the full history, newest first. Never fails: missing or
    /// unparseable data is an empty history.
    pub fn load(&self) -> Vec<HistoryRecord> {
        let Ok(Some(json)) = self.db.kv_get(HISTORY_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&json).unwrap_or_default()
    }

    /// Prepend a record and persist the list.
    pub fn append(&self, record: HistoryRecord) -> Result<(), StorageError> {
        let mut records = self.load();
        records.insert(0, record);
        let json = serde_json::to_string(&records)?;
        self.db
            .kv_set(HISTORY_KEY, &json)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))
    }

    /// Drop all records.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.db
            .kv_delete(HISTORY_KEY)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))
    }

    /// Number of sessions completed on the given day (UTC).
    pub fn count_on(&self, day: DateTime<Utc>) -> usize {
        let day = day.date_naive();
        self.load()
            .iter()
            .filter(|r| r.date.date_naive() == day)
            .count()
    }
}
