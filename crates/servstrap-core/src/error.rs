//! Unified error handling for Servstrap Core.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Servstrap Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// servstrap-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum ServstrapError {
    /// Errors from the domain layer (business logic violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ServstrapError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Servstrap".into(),
                "Please report this issue at: https://github.com/cosecruz/servstrap/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input (project name, rotation thresholds).
    Validation,
    /// A precondition failed before any mutation (privileges, tools).
    Precondition,
    /// A provisioning step failed after mutation began.
    Provisioning,
    Internal,
}

/// Convenient result type alias.
pub type ServstrapResult<T> = Result<T, ServstrapError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ServstrapResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ServstrapResult<T> {
        self.map_err(|e| ServstrapError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_categorise_as_validation() {
        let err: ServstrapError = DomainError::InvalidProjectName {
            name: "..".into(),
            reason: "traversal".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn precondition_errors_categorise() {
        let err: ServstrapError = ApplicationError::PermissionDenied.into();
        assert_eq!(err.category(), ErrorCategory::Precondition);

        let err: ServstrapError = ApplicationError::DependencyMissing {
            tool: "nssm".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Precondition);
    }

    #[test]
    fn step_failures_categorise_as_provisioning() {
        for err in [
            ApplicationError::EnvironmentCreationFailed { reason: "x".into() },
            ApplicationError::DependencyInstallFailed { reason: "x".into() },
            ApplicationError::ServiceInstallFailed { reason: "x".into() },
        ] {
            assert_eq!(
                ServstrapError::from(err).category(),
                ErrorCategory::Provisioning
            );
        }
    }

    #[test]
    fn suggestions_are_never_empty() {
        let err: ServstrapError = ApplicationError::DependencyMissing {
            tool: "python".into(),
        }
        .into();
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let wrapped = result.context("probing tool");
        assert!(matches!(wrapped, Err(ServstrapError::Internal { .. })));
    }
}
