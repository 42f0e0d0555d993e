use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid rotation policy: {reason}")]
    InvalidRotationPolicy { reason: String },

    #[error("unknown startup mode: {0}")]
    UnknownStartupMode(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, underscores, and spaces".into(),
                "Start with a letter or number".into(),
                "Examples: billing-sync, data_feed, inventory watcher".into(),
            ],
            Self::InvalidRotationPolicy { reason } => vec![
                format!("Rotation policy rejected: {}", reason),
                "Both max_age_secs and max_bytes must be greater than zero".into(),
            ],
            Self::UnknownStartupMode(mode) => vec![
                format!("'{}' is not a startup mode", mode),
                "Supported modes: auto, manual, disabled".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidRotationPolicy { .. }
            | Self::UnknownStartupMode(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
