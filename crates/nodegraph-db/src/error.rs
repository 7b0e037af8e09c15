//! Error types for nodegraph-db

use nodegraph_error::{ContractError, ExecutionFailure};
use thiserror::Error;

use crate::client::ClientError;

#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("Query execution error in `{query_name}`: {source}")]
    QueryExecution {
        query_name: String,
        #[source]
        source: ClientError,
    },

    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    #[error("Could not decode child record: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<DbError> for nodegraph_error::Error {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Contract(e) => e.into(),
            DbError::QueryExecution { query_name, source } => ExecutionFailure::Query {
                query_name,
                message: source.to_string(),
            }
            .into(),
            DbError::ResponseShape(msg) => ExecutionFailure::ResponseShape(msg).into(),
            DbError::Decode(msg) => ExecutionFailure::Decode(msg).into(),
            DbError::Config(msg) => nodegraph_error::Error::Config(msg),
        }
    }
}
