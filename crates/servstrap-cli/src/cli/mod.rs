//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "servstrap",
    bin_name = "servstrap",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Provision Python services on Windows",
    long_about = "Servstrap sets up everything a Python background service \
                  needs on a Windows host: directory layout, virtual \
                  environment, dependencies, and an NSSM service \
                  registration with rotated log capture.",
    after_help = "EXAMPLES:\n\
        \x20 servstrap provision billing-sync --yes\n\
        \x20 servstrap provision billing-sync --base D:\\services --dry-run\n\
        \x20 servstrap status billing-sync --format json\n\
        \x20 servstrap completions powershell > servstrap.ps1",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision a project: layout, environment, dependencies, service.
    #[command(
        visible_alias = "p",
        about = "Provision a Python service",
        after_help = "EXAMPLES:\n\
            \x20 servstrap provision                  # configured default project\n\
            \x20 servstrap provision billing-sync --yes\n\
            \x20 servstrap provision billing-sync --startup manual --dry-run"
    )]
    Provision(ProvisionArgs),

    /// Inspect a project's provisioned state.
    #[command(
        visible_alias = "st",
        about = "Show service and layout state",
        after_help = "EXAMPLES:\n\
            \x20 servstrap status billing-sync\n\
            \x20 servstrap status billing-sync --format json"
    )]
    Status(StatusArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 servstrap completions bash > ~/.local/share/bash-completion/completions/servstrap\n\
            \x20 servstrap completions zsh  > ~/.zfunc/_servstrap\n\
            \x20 servstrap completions powershell > servstrap.ps1"
    )]
    Completions(CompletionsArgs),

    /// Manage the Servstrap configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 servstrap config get provision.base_dir\n\
            \x20 servstrap config set tools.python C:\\Python312\\python.exe\n\
            \x20 servstrap config list"
    )]
    Config(ConfigCommands),
}

// ── provision ─────────────────────────────────────────────────────────────────

/// Arguments for `servstrap provision`.
#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Project identifier.  Becomes the directory name under the base and
    /// the service name.  Defaults to the configured default project.
    #[arg(value_name = "PROJECT", help = "Project identifier")]
    pub project: Option<String>,

    /// Override the automation base directory.
    #[arg(
        short = 'b',
        long = "base",
        value_name = "DIR",
        help = "Base directory (default from config)"
    )]
    pub base: Option<PathBuf>,

    /// Override the service startup mode.
    #[arg(
        short = 's',
        long = "startup",
        value_name = "MODE",
        value_enum,
        help = "Service startup mode"
    )]
    pub startup: Option<Startup>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and provision immediately"
    )]
    pub yes: bool,

    /// Preview the derived plan without touching the machine.
    #[arg(long = "dry-run", help = "Show what would be provisioned without provisioning")]
    pub dry_run: bool,
}

// ── status ────────────────────────────────────────────────────────────────────

/// Arguments for `servstrap status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Project identifier.  Defaults to the configured default project.
    #[arg(value_name = "PROJECT", help = "Project identifier")]
    pub project: Option<String>,

    /// Override the automation base directory.
    #[arg(
        short = 'b',
        long = "base",
        value_name = "DIR",
        help = "Base directory (default from config)"
    )]
    pub base: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: StatusFormat,
}

/// Output format for the `status` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFormat {
    /// Human-readable key/value lines.
    Table,
    /// JSON object.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `servstrap completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `servstrap config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `provision.base_dir`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Service startup modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Startup {
    /// Start with the operating system.
    Auto,
    /// Start on demand.
    Manual,
    /// Never start.
    Disabled,
}

impl std::fmt::Display for Startup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
