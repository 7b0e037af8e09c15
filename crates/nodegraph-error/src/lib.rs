pub mod contract;
pub mod execution;
pub mod policy;
pub mod result_ext;
pub mod severity;

// public exports
pub use contract::ContractError;
pub use execution::ExecutionFailure;
pub use policy::{ErrorPolicy, NoopPolicy};
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use result_ext::ResultExt;
pub use severity::Severity;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Default severity for this error. Policies may override it.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Contract(_) | Error::Config(_) => Severity::Fatal,
            Error::Execution(_) => Severity::Error,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::Contract(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_are_fatal() {
        let err: Error = ContractError::UnknownDeclaredType {
            name: "float64".into(),
        }
        .into();
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("float64"));
    }

    #[test]
    fn execution_failures_are_errors() {
        let err: Error = ExecutionFailure::Query {
            query_name: "process".into(),
            message: "connection reset".into(),
        }
        .into();
        assert_eq!(err.severity(), Severity::Error);
        assert!(!err.is_contract_violation());
        assert_eq!(err.to_string(), "Query `process` failed: connection reset");
    }
}
