//! `servstrap config` — read and write configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let mut config = config;
            set_config_value(&mut config, &key, &value)?;
            let path = AppConfig::config_path();
            write_config(&config, &path)?;
            output.print(&format!("{key} = {value} (written to {})", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "provision.base_dir" => Ok(config.provision.base_dir.display().to_string()),
        "provision.default_project" => Ok(config.provision.default_project.clone()),
        "provision.description" => Ok(config.provision.description.clone()),
        "provision.startup" => Ok(config.provision.startup.clone()),
        "tools.python" => Ok(config.tools.python.clone()),
        "tools.nssm" => Ok(config.tools.nssm.clone()),
        "rotation.max_age_secs" => Ok(config.rotation.max_age_secs.to_string()),
        "rotation.max_bytes" => Ok(config.rotation.max_bytes.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(unknown_key(key)),
    }
}

fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> CliResult<()> {
    match key {
        "provision.base_dir" => config.provision.base_dir = value.into(),
        "provision.default_project" => config.provision.default_project = value.into(),
        "provision.description" => config.provision.description = value.into(),
        "provision.startup" => config.provision.startup = value.into(),
        "tools.python" => config.tools.python = value.into(),
        "tools.nssm" => config.tools.nssm = value.into(),
        "rotation.max_age_secs" => config.rotation.max_age_secs = parse_number(key, value)?,
        "rotation.max_bytes" => config.rotation.max_bytes = parse_number(key, value)?,
        "output.no_color" => {
            config.output.no_color = value.parse().map_err(|_| CliError::ConfigError {
                message: format!("'{value}' is not a boolean (expected true/false)"),
                source: None,
            })?;
        }
        "output.format" => config.output.format = value.into(),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn write_config(config: &AppConfig, path: &std::path::Path) -> CliResult<()> {
    let serialised = toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serialised)?;
    Ok(())
}

fn parse_number(key: &str, value: &str) -> CliResult<u64> {
    value.parse().map_err(|_| CliError::ConfigError {
        message: format!("'{value}' is not a number for key '{key}'"),
        source: None,
    })
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
