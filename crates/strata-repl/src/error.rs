//! Error types for command evaluation
//!
//! Every variant renders to the exact line the playground shows the user.
//! The class prefix (`RuntimeError`, `NameError`, `Error`) is how callers
//! tell failures apart from ordinary results.

use thiserror::Error;

/// Main error type for interpreter operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplError {
    /// `branch_create` on a name that is already taken
    #[error("RuntimeError: Branch already exists")]
    BranchExists,

    /// `branch_use` or `branch_fork` naming a branch that does not exist
    #[error("RuntimeError: Branch not found: {0}")]
    BranchNotFound(String),

    /// Compare-and-swap against a missing cell or a stale version
    #[error("RuntimeError: CAS failed")]
    CasFailed,

    /// Line matched no known call shape
    #[error("NameError: name '{0}' is not defined")]
    NameNotDefined(String),

    /// Any unexpected fault while handling a line
    #[error("Error: {0}")]
    Internal(String),
}

impl ReplError {
    /// Wrap an arbitrary error as an internal fault.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        ReplError::Internal(err.to_string())
    }

    /// Short class name used in log records.
    pub fn class(&self) -> &'static str {
        match self {
            ReplError::BranchExists | ReplError::BranchNotFound(_) | ReplError::CasFailed => {
                "RuntimeError"
            }
            ReplError::NameNotDefined(_) => "NameError",
            ReplError::Internal(_) => "Error",
        }
    }
}

/// Result type alias for interpreter operations
pub type Result<T> = std::result::Result<T, ReplError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_playground_text() {
        assert_eq!(
            ReplError::BranchExists.to_string(),
            "RuntimeError: Branch already exists"
        );
        assert_eq!(
            ReplError::BranchNotFound("dev".into()).to_string(),
            "RuntimeError: Branch not found: dev"
        );
        assert_eq!(ReplError::CasFailed.to_string(), "RuntimeError: CAS failed");
        assert_eq!(
            ReplError::NameNotDefined("foo".into()).to_string(),
            "NameError: name 'foo' is not defined"
        );
        assert_eq!(ReplError::internal("boom").to_string(), "Error: boom");
    }

    #[test]
    fn test_class_names() {
        assert_eq!(ReplError::CasFailed.class(), "RuntimeError");
        assert_eq!(ReplError::NameNotDefined("x".into()).class(), "NameError");
        assert_eq!(ReplError::internal("x").class(), "Error");
    }
}
