//! Coarse-grained classification for programmatic handling of errors.
//!
//! Typical mappings:
//! - Error: failures of an external collaborator that the caller may retry or report
//! - Fatal: programming-contract violations; retrying the same call cannot succeed
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_outranks_error() {
        assert!(Severity::Fatal > Severity::Error);
        assert_eq!(Severity::Error.max(Severity::Fatal), Severity::Fatal);
        assert_eq!(Severity::Fatal.to_string(), "fatal");
    }
}
