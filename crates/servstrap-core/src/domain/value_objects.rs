//! Domain value objects: StartupMode, RotationPolicy, ServiceState.
//!
//! # Design
//!
//! These are pure value types — `Copy` where possible, equality-by-value,
//! no identity. They hold the fixed vocabulary of the service registry:
//! how a service starts, how its captured output rotates, and what state a
//! registration is in when queried.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── StartupMode ───────────────────────────────────────────────────────────────

/// How the registered service starts.
///
/// `Auto` is the provisioning default: the service starts with the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    #[default]
    Auto,
    Manual,
    Disabled,
}

impl StartupMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for StartupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartupMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Ok(Self::Auto),
            "manual" | "demand" => Ok(Self::Manual),
            "disabled" => Ok(Self::Disabled),
            other => Err(DomainError::UnknownStartupMode(other.to_string())),
        }
    }
}

// ── RotationPolicy ────────────────────────────────────────────────────────────

/// Log rotation thresholds for the service's captured stdout/stderr.
///
/// A log file rotates when it reaches `max_age_secs` of age or `max_bytes`
/// of size, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotationPolicy {
    pub max_age_secs: u64,
    pub max_bytes: u64,
}

impl RotationPolicy {
    /// Default age threshold: one day.
    pub const DEFAULT_MAX_AGE_SECS: u64 = 86_400;
    /// Default size threshold: 1 MiB.
    pub const DEFAULT_MAX_BYTES: u64 = 1_048_576;

    /// Build a policy, rejecting thresholds that would disable rotation.
    pub fn new(max_age_secs: u64, max_bytes: u64) -> Result<Self, DomainError> {
        if max_age_secs == 0 {
            return Err(DomainError::InvalidRotationPolicy {
                reason: "max_age_secs must be greater than zero".into(),
            });
        }
        if max_bytes == 0 {
            return Err(DomainError::InvalidRotationPolicy {
                reason: "max_bytes must be greater than zero".into(),
            });
        }
        Ok(Self {
            max_age_secs,
            max_bytes,
        })
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_age_secs: Self::DEFAULT_MAX_AGE_SECS,
            max_bytes: Self::DEFAULT_MAX_BYTES,
        }
    }
}

// ── ServiceState ──────────────────────────────────────────────────────────────

/// The state of a service registration as reported by the control utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceState {
    NotInstalled,
    Running,
    Stopped,
    Paused,
    /// The utility answered but the state string was not recognised.
    Unknown,
}

impl ServiceState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotInstalled => "not-installed",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a registration exists at all, regardless of run state.
    pub const fn is_installed(&self) -> bool {
        !matches!(self, Self::NotInstalled)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_mode_display_is_lowercase() {
        assert_eq!(StartupMode::Auto.to_string(), "auto");
        assert_eq!(StartupMode::Disabled.to_string(), "disabled");
    }

    #[test]
    fn startup_mode_from_str_accepts_aliases() {
        assert_eq!("automatic".parse::<StartupMode>().unwrap(), StartupMode::Auto);
        assert_eq!("demand".parse::<StartupMode>().unwrap(), StartupMode::Manual);
    }

    #[test]
    fn startup_mode_from_str_unknown_errors() {
        assert!("boot".parse::<StartupMode>().is_err());
        assert!("".parse::<StartupMode>().is_err());
    }

    #[test]
    fn rotation_policy_defaults() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.max_age_secs, 86_400);
        assert_eq!(policy.max_bytes, 1_048_576);
    }

    #[test]
    fn rotation_policy_rejects_zero_thresholds() {
        assert!(RotationPolicy::new(0, 1024).is_err());
        assert!(RotationPolicy::new(3600, 0).is_err());
        assert!(RotationPolicy::new(3600, 1024).is_ok());
    }

    #[test]
    fn service_state_is_installed() {
        assert!(!ServiceState::NotInstalled.is_installed());
        assert!(ServiceState::Running.is_installed());
        assert!(ServiceState::Stopped.is_installed());
        assert!(ServiceState::Unknown.is_installed());
    }
}
