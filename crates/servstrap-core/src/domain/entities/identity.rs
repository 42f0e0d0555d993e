//! Project identity: the validated name and what it derives.
//!
//! A single identifier fans out into three external names: the project
//! directory under the automation base, the OS service name (identical to
//! the project name), and the human-facing display name (title-cased words
//! with separators removed). Deriving all three from one validated value
//! keeps them consistent by construction.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{error::DomainError, validation};

// ── ProjectName ───────────────────────────────────────────────────────────────

/// A validated project identifier.
///
/// Construction goes through [`ProjectName::parse`], which enforces the
/// character rules in `validation.rs`. Once a `ProjectName` exists it is
/// guaranteed safe to join onto the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and wrap a raw identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        validation::validate_project_name(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ── ProjectIdentity ───────────────────────────────────────────────────────────

/// The identity of a provisioned project and its derived names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectIdentity {
    name: ProjectName,
}

impl ProjectIdentity {
    pub fn new(name: ProjectName) -> Self {
        Self { name }
    }

    /// Shorthand for `ProjectIdentity::new(ProjectName::parse(raw)?)`.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::new(ProjectName::parse(raw)?))
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    /// The OS service name. Identical to the project name.
    pub fn service_name(&self) -> &str {
        self.name.as_str()
    }

    /// The human-facing display name: each word title-cased, word
    /// separators (spaces, hyphens, underscores) removed.
    ///
    /// `billing-sync` → `BillingSync`, `data feed` → `DataFeed`.
    pub fn display_name(&self) -> String {
        self.name
            .as_str()
            .split(|c: char| matches!(c, ' ' | '-' | '_'))
            .filter(|word| !word.is_empty())
            .map(title_case)
            .collect()
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_name() {
        let name = ProjectName::parse("billing-sync").unwrap();
        assert_eq!(name.as_str(), "billing-sync");
    }

    #[test]
    fn parse_rejects_invalid_name() {
        assert!(ProjectName::parse("../escape").is_err());
        assert!(ProjectName::parse("").is_err());
    }

    #[test]
    fn from_str_round_trips() {
        let name: ProjectName = "data_feed".parse().unwrap();
        assert_eq!(name.to_string(), "data_feed");
    }

    #[test]
    fn service_name_is_project_name() {
        let identity = ProjectIdentity::parse("billing-sync").unwrap();
        assert_eq!(identity.service_name(), "billing-sync");
    }

    #[test]
    fn display_name_title_cases_and_strips_separators() {
        let identity = ProjectIdentity::parse("billing-sync").unwrap();
        assert_eq!(identity.display_name(), "BillingSync");
    }

    #[test]
    fn display_name_handles_spaces_and_underscores() {
        assert_eq!(
            ProjectIdentity::parse("inventory watcher").unwrap().display_name(),
            "InventoryWatcher"
        );
        assert_eq!(
            ProjectIdentity::parse("data_feed_sync").unwrap().display_name(),
            "DataFeedSync"
        );
    }

    #[test]
    fn display_name_lowercases_word_tails() {
        assert_eq!(
            ProjectIdentity::parse("BILLING-SYNC").unwrap().display_name(),
            "BillingSync"
        );
    }

    #[test]
    fn display_name_of_single_word() {
        assert_eq!(
            ProjectIdentity::parse("billing").unwrap().display_name(),
            "Billing"
        );
    }
}
