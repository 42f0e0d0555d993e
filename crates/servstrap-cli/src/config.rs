//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config`, else the platform config dir)
//! 3. Built-in defaults (always present)
//!
//! A missing default-location file is not an error; a file that exists but
//! cannot be read or parsed is.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use servstrap_core::{
    application::DEFAULT_DESCRIPTION,
    domain::{DomainError, RotationPolicy, StartupMode},
};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What and where to provision.
    pub provision: ProvisionConfig,
    /// Program names (or paths) of the external tools.
    pub tools: ToolsConfig,
    /// Log rotation thresholds applied to the service's captured output.
    pub rotation: RotationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// The automation base directory; projects live directly beneath it.
    pub base_dir: PathBuf,
    /// Project used when the command line names none.
    pub default_project: String,
    /// Description text written into the service registration.
    pub description: String,
    /// Startup mode name: auto, manual, or disabled.
    pub startup: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub python: String,
    pub nssm: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub max_age_secs: u64,
    pub max_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        let base_dir = if cfg!(windows) {
            PathBuf::from(r"C:\automation")
        } else {
            PathBuf::from("/srv/automation")
        };
        Self {
            base_dir,
            default_project: "py-service".into(),
            description: DEFAULT_DESCRIPTION.into(),
            startup: "auto".into(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            python: "python".into(),
            nssm: "nssm".into(),
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_age_secs: RotationPolicy::DEFAULT_MAX_AGE_SECS,
            max_bytes: RotationPolicy::DEFAULT_MAX_BYTES,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl ProvisionConfig {
    /// Parse the configured startup mode name.
    pub fn startup_mode(&self) -> Result<StartupMode, DomainError> {
        self.startup.parse()
    }
}

impl RotationConfig {
    /// Validate the configured thresholds into a policy.
    pub fn to_policy(&self) -> Result<RotationPolicy, DomainError> {
        RotationPolicy::new(self.max_age_secs, self.max_bytes)
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `--config` path must exist; the default location may be
    /// absent, in which case the built-in defaults are used as-is.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("could not parse config file {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.servstrap.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "servstrap", "servstrap")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".servstrap.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tools_are_bare_program_names() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.tools.python, "python");
        assert_eq!(cfg.tools.nssm, "nssm");
    }

    #[test]
    fn default_rotation_matches_policy_defaults() {
        let cfg = AppConfig::default();
        let policy = cfg.rotation.to_policy().unwrap();
        assert_eq!(policy, RotationPolicy::default());
    }

    #[test]
    fn default_startup_parses_to_auto() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.provision.startup_mode().unwrap(), StartupMode::Auto);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tools]\nnssm = \"C:/tools/nssm.exe\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.tools.nssm, "C:/tools/nssm.exe");
        assert_eq!(cfg.tools.python, "python");
        assert_eq!(cfg.provision.default_project, "py-service");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tools = not toml").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.provision.default_project, cfg.provision.default_project);
        assert_eq!(back.rotation.max_bytes, cfg.rotation.max_bytes);
    }
}
