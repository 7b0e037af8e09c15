/// Violations of the query-construction contract.
///
/// Each of these is raised before any transaction is opened. They describe a
/// bug in the caller (or in its configuration), never a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("Unknown declared type `{name}` (expected one of: int, bool, string)")]
    UnknownDeclaredType { name: String },

    #[error("Filter `{field}` declared as {declared} but given a {actual} value")]
    TypeMismatch {
        field: String,
        declared: &'static str,
        actual: &'static str,
    },

    #[error("Parameter `{param}` for filter `{field}` is already allocated")]
    DuplicateParameter { field: String, param: String },

    #[error("`{name}` is not a valid predicate or parameter name")]
    InvalidIdentifier { name: String },

    #[error("Filter `{field}` is not declared for the `{query}` query")]
    UnknownField { field: String, query: String },

    #[error("`{raw}` is not a valid node uid")]
    InvalidUid { raw: String },
}
