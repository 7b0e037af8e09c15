//! Policies decide how errors leave the library.
//!
//! Library code in this workspace does not log errors; it returns them and lets
//! the application install an `ErrorPolicy` to decide how to present or route them.
//!
//! Example
//! ```rust,ignore
//! use nodegraph_error::{ErrorPolicy, Severity, Error};
//!
//! struct PrintPolicy;
//! impl ErrorPolicy for PrintPolicy {
//!     fn classify(&self, e: &Error) -> Severity { e.severity() }
//!     fn emit(&self, e: &Error) { eprintln!("[{}] {e}", self.classify(e)); }
//! }
//! ```

use super::{Error, Severity};

/// A policy for classifying and emitting errors.
pub trait ErrorPolicy: Send + Sync {
    /// Classify the error's severity
    fn classify(&self, error: &Error) -> Severity;

    /// Emit the error according to the policy (log, metrics, UI, ...)
    fn emit(&self, error: &Error);
}

/// A policy that classifies but never emits
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, _error: &Error) {}
}

/// A policy that uses the error's default severity and emits via tracing
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        use tracing::{event, Level};

        let severity = self.classify(error);
        event!(Level::ERROR, %severity, error = %error);
    }
}
