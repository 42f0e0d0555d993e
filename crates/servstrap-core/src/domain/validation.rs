//! Project-name validation rules.
//!
//! The name becomes three external identifiers at once: a directory name
//! under the automation base, the OS service name, and the seed for the
//! display name. The rules here exist to keep all three well-formed — in
//! particular, a validated name can never escape the base directory.

use crate::domain::error::DomainError;

/// Validate a raw project identifier.
///
/// Accepted: first character alphanumeric; remaining characters
/// alphanumeric, space, `-`, or `_`. Rejected: empty input, path
/// separators, leading dots, and `..` sequences.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(invalid(name, "name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid(name, "name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid(name, "name cannot contain path separators"));
    }
    if name.contains("..") {
        return Err(invalid(name, "name cannot contain '..'"));
    }

    let mut chars = name.chars();
    // Guarded by the is_empty check above.
    let first = chars.next().unwrap_or_default();
    if !first.is_ascii_alphanumeric() {
        return Err(invalid(name, "name must start with a letter or number"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, ' ' | '-' | '_'))
    {
        return Err(invalid(
            name,
            &format!("character '{bad}' is not allowed"),
        ));
    }
    if name.ends_with(' ') {
        return Err(invalid(name, "name cannot end with a space"));
    }

    Ok(())
}

fn invalid(name: &str, reason: &str) -> DomainError {
    DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass() {
        for name in &[
            "billing-sync",
            "data_feed",
            "inventory watcher",
            "svc123",
            "X",
        ] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(validate_project_name("").is_err());
    }

    #[test]
    fn dotfile_name_is_invalid() {
        assert!(validate_project_name(".hidden").is_err());
    }

    #[test]
    fn path_separators_are_invalid() {
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("a\\b").is_err());
    }

    #[test]
    fn traversal_sequences_are_invalid() {
        assert!(validate_project_name("a..b").is_err());
        assert!(validate_project_name("..").is_err());
    }

    #[test]
    fn leading_symbol_is_invalid() {
        assert!(validate_project_name("-svc").is_err());
        assert!(validate_project_name("_svc").is_err());
        assert!(validate_project_name(" svc").is_err());
    }

    #[test]
    fn exotic_characters_are_invalid() {
        assert!(validate_project_name("svc:1").is_err());
        assert!(validate_project_name("svc*").is_err());
        assert!(validate_project_name("svc\t").is_err());
    }

    #[test]
    fn trailing_space_is_invalid() {
        assert!(validate_project_name("svc ").is_err());
    }
}
