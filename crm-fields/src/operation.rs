//! Operation traits and execution results.
//!
//! Each exposed call is a struct whose fields are its parameters. Executing
//! it yields an [`ExecutionResult`] carrying the JSON value for the caller
//! and, for mutations, an audit [`LogEntry`].

use async_trait::async_trait;
use serde_json::Value;

use crate::types::LogEntry;

/// Static metadata for an operation
pub trait Operation {
    fn verb(&self) -> &'static str;

    fn noun(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Canonical op string, e.g. "create field"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context
#[async_trait]
pub trait Execute<C: Send + Sync, E>: Operation {
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

/// Runs operations and persists their log entries
#[async_trait]
pub trait OperationProcessor<C: Send + Sync, E> {
    async fn process<T>(&self, operation: &T, ctx: &C) -> Result<Value, E>
    where
        T: Execute<C, E> + Send + Sync;
}

/// Result of executing an operation
///
/// - Logged: mutations, audited
/// - Unlogged: reads
/// - Failed: errors, logged when the operation was a mutation
pub enum ExecutionResult<T, E> {
    Logged { value: T, log_entry: LogEntry },
    Unlogged { value: T },
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<E: std::fmt::Display> ExecutionResult<Value, E> {
    /// Wrap the outcome of a mutation, logging success and failure alike.
    pub fn logged(
        op: String,
        input: Value,
        actor: Option<String>,
        started: std::time::Instant,
        result: Result<Value, E>,
    ) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => Self::Logged {
                log_entry: LogEntry::new(op, input, value.clone(), actor, duration_ms),
                value,
            },
            Err(error) => {
                let mut log_entry = LogEntry::failure(op, input, &error.to_string(), duration_ms);
                log_entry.actor = actor;
                Self::Failed {
                    error,
                    log_entry: Some(log_entry),
                }
            }
        }
    }

    /// Wrap the outcome of a read
    pub fn unlogged(result: Result<Value, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

impl<T, E> ExecutionResult<T, E> {
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }
}
