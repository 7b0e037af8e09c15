/// Failures that happen while talking to the database, or while reading what
/// it sent back.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExecutionFailure {
    #[error("Query `{query_name}` failed: {message}")]
    Query { query_name: String, message: String },

    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    #[error("Could not decode record: {0}")]
    Decode(String),
}
