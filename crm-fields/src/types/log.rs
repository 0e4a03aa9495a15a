//! Audit entries for mutating operations

use super::ids::LogEntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A log entry recording one operation execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,

    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "create field")
    pub op: String,

    /// The normalized input parameters
    pub input: Value,

    /// The result, or `{"error": ...}`
    pub output: Value,

    /// Acting user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    pub duration_ms: u64,
}

impl LogEntry {
    pub fn new(
        op: impl Into<String>,
        input: Value,
        output: Value,
        actor: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            op: op.into(),
            input,
            output,
            actor,
            duration_ms,
        }
    }

    /// Entry for a failed operation
    pub fn failure(op: impl Into<String>, input: Value, error: &str, duration_ms: u64) -> Self {
        Self::new(
            op,
            input,
            serde_json::json!({ "error": error }),
            None,
            duration_ms,
        )
    }

    /// Set the actor unless one was already recorded by the operation
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        if self.actor.is_none() {
            self.actor = Some(actor.into());
        }
        self
    }
}
