use super::{ErrorPolicy, Result, Severity};

/// Extension trait for `Result` enabling policy-driven emission without
/// putting side-effects into core control flow.
///
/// Typical usage: at the boundary of an application, hand the result of a
/// fetch to one of these helpers, then keep handling the (unchanged) result.
///
/// ```rust,ignore
/// use nodegraph_error::{NoopPolicy, ResultExt};
///
/// let children = fetch(..).await.map_err(nodegraph_error::Error::from).emit_event(&NoopPolicy);
/// ```
pub trait ResultExt<T> {
    /// Emit the error using the provided policy and return the result unchanged
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self;

    /// Emit only if the policy classifies the error as an error
    fn emit_error(self, policy: &impl ErrorPolicy) -> Self;

    /// Emit only if the policy classifies the error as fatal
    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }

    fn emit_error(self, policy: &impl ErrorPolicy) -> Self {
        emit_at(self, policy, Severity::Error)
    }

    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self {
        emit_at(self, policy, Severity::Fatal)
    }
}

fn emit_at<T>(result: Result<T>, policy: &impl ErrorPolicy, level: Severity) -> Result<T> {
    if let Err(ref e) = result {
        if policy.classify(e) == level {
            policy.emit(e);
        }
    }
    result
}
