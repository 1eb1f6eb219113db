// Error taxonomy shared by the task service and the REST layer.

/// Errors surfaced by task operations.
///
/// Validation failures and missing records are terminal, caller-visible
/// outcomes; storage failures propagate unretried from the SQLite layer.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Malformed or out-of-range input: bad id, blank name, id-on-create,
    /// null payload. Maps to HTTP 400.
    #[error("{0}")]
    InvalidArgument(String),
    /// No record exists for a well-formed id. Maps to HTTP 404.
    #[error("task not found: {0}")]
    NotFound(i64),
    /// The storage layer is unavailable or rejected the operation. Maps to
    /// HTTP 500.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl TaskError {
    pub fn invalid(msg: impl Into<String>) -> TaskError {
        TaskError::InvalidArgument(msg.into())
    }
}
