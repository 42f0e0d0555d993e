//! Implementation of the `servstrap provision` command.
//!
//! Responsibility: translate CLI arguments and configuration into a
//! `ProvisionRequest`, call the core provision service, and display
//! results. No business logic lives here.

use tracing::{debug, info, instrument};

use servstrap_adapters::{HostPrivileges, LocalFilesystem, NssmServiceControl, VenvEnvironment};
use servstrap_core::{
    application::{ProvisionReport, ProvisionRequest, ProvisionService, ProvisionWarning},
    domain::{ProjectIdentity, StartupMode},
};

use crate::{
    cli::{ProvisionArgs, Startup, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `servstrap provision` command.
///
/// Dispatch sequence:
/// 1. Resolve the project identity and provisioning settings
/// 2. Early-exit if `--dry-run` (show the plan, touch nothing)
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Execute provisioning via `ProvisionService` with the real adapters
/// 5. Print warnings, the final configuration summary, and next steps
#[instrument(skip_all, fields(project = args.project.as_deref().unwrap_or("<default>")))]
pub fn execute(
    args: ProvisionArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve identity + settings
    let identity = resolve_identity(args.project.as_deref(), &config)?;
    let request = build_request(&args, &identity, &config)?;

    debug!(
        project = %identity,
        base = %request.base_dir.display(),
        startup = %request.startup,
        "Request resolved"
    );

    // 2. Dry run: describe but do not touch anything — not even the
    //    precondition probes run.
    if args.dry_run {
        output.info(&format!(
            "Dry run: would provision '{identity}' (nothing will be changed)"
        ))?;
        show_plan(&request, &output)?;
        return Ok(());
    }

    // 3. Show the plan and confirm
    if !global.quiet && !args.yes {
        show_plan(&request, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Create adapters and provision
    let service = ProvisionService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(VenvEnvironment::new(config.tools.python.clone())),
        Box::new(NssmServiceControl::new(config.tools.nssm.clone())),
        Box::new(HostPrivileges::new()),
    );

    output.header(&format!("Provisioning '{identity}'..."))?;
    info!(project = %identity, "Provision started");

    let report = service.provision(&request).map_err(CliError::Core)?;

    info!(project = %identity, warnings = report.warnings.len(), "Provision completed");

    // 5. Warnings + summary + next steps
    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }
    show_summary(&report, &output)?;
    output.success(&format!("Service '{}' provisioned!", report.service.name))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        if report
            .warnings
            .iter()
            .any(|w| matches!(w, ProvisionWarning::EntryPointMissing { .. }))
        {
            output.print(&format!(
                "  # supply {} before starting",
                report.layout.entry_point.display()
            ))?;
        }
        output.print(&format!("  {} start {}", config.tools.nssm, report.service.name))?;
    }

    Ok(())
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// The identity to provision: the positional argument, else the configured
/// default project.
fn resolve_identity(arg: Option<&str>, config: &AppConfig) -> CliResult<ProjectIdentity> {
    let raw = arg.unwrap_or(&config.provision.default_project);
    ProjectIdentity::parse(raw).map_err(|e| CliError::Core(e.into()))
}

fn build_request(
    args: &ProvisionArgs,
    identity: &ProjectIdentity,
    config: &AppConfig,
) -> CliResult<ProvisionRequest> {
    let base = args
        .base
        .clone()
        .unwrap_or_else(|| config.provision.base_dir.clone());

    // The flag wins over the configured mode.
    let startup = match args.startup {
        Some(flag) => convert_startup(flag),
        None => config
            .provision
            .startup_mode()
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: None,
            })?,
    };

    let rotation = config
        .rotation
        .to_policy()
        .map_err(|e| CliError::ConfigError {
            message: e.to_string(),
            source: None,
        })?;

    Ok(ProvisionRequest::new(identity.clone(), base)
        .with_description(config.provision.description.clone())
        .with_startup(startup)
        .with_rotation(rotation))
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_startup(startup: Startup) -> StartupMode {
    match startup {
        Startup::Auto => StartupMode::Auto,
        Startup::Manual => StartupMode::Manual,
        Startup::Disabled => StartupMode::Disabled,
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(request: &ProvisionRequest, out: &OutputManager) -> CliResult<()> {
    let layout = request.layout();
    out.header("Plan")?;
    out.kv("Project:", &request.identity)?;
    out.kv("Service:", request.identity.service_name())?;
    out.kv("Display name:", request.identity.display_name())?;
    out.kv("Root:", layout.root.display())?;
    out.kv("Environment:", layout.env_dir.display())?;
    out.kv("Entry point:", layout.entry_point.display())?;
    out.kv("Startup:", request.startup)?;
    out.kv(
        "Log rotation:",
        format!(
            "{} s or {} bytes",
            request.rotation.max_age_secs, request.rotation.max_bytes
        ),
    )?;
    out.print("")?;
    Ok(())
}

fn show_summary(report: &ProvisionReport, out: &OutputManager) -> CliResult<()> {
    let service = &report.service;
    out.header("Configured service")?;
    out.kv("Service:", &service.name)?;
    out.kv("Display name:", &service.display_name)?;
    out.kv("Application:", service.application.display())?;
    out.kv("Directory:", service.working_dir.display())?;
    out.kv("Arguments:", &service.parameters)?;
    out.kv("Startup:", service.startup)?;
    out.kv("Stdout log:", service.stdout_log.display())?;
    out.kv("Stderr log:", service.stderr_log.display())?;
    out.kv(
        "Log rotation:",
        format!(
            "{} s or {} bytes",
            service.rotation.max_age_secs, service.rotation.max_bytes
        ),
    )?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(project: Option<&str>) -> ProvisionArgs {
        ProvisionArgs {
            project: project.map(String::from),
            base: None,
            startup: None,
            yes: true,
            dry_run: false,
        }
    }

    // ── resolve_identity ──────────────────────────────────────────────────

    #[test]
    fn explicit_project_wins() {
        let identity = resolve_identity(Some("billing-sync"), &AppConfig::default()).unwrap();
        assert_eq!(identity.service_name(), "billing-sync");
    }

    #[test]
    fn default_project_is_used_when_omitted() {
        let identity = resolve_identity(None, &AppConfig::default()).unwrap();
        assert_eq!(identity.service_name(), "py-service");
    }

    #[test]
    fn invalid_project_is_rejected() {
        assert!(matches!(
            resolve_identity(Some("../escape"), &AppConfig::default()),
            Err(CliError::Core(_))
        ));
    }

    // ── build_request ─────────────────────────────────────────────────────

    #[test]
    fn flag_startup_overrides_config() {
        let mut a = args(Some("svc"));
        a.startup = Some(Startup::Manual);
        let identity = resolve_identity(Some("svc"), &AppConfig::default()).unwrap();
        let request = build_request(&a, &identity, &AppConfig::default()).unwrap();
        assert_eq!(request.startup, StartupMode::Manual);
    }

    #[test]
    fn config_startup_is_the_fallback() {
        let mut config = AppConfig::default();
        config.provision.startup = "disabled".into();
        let identity = resolve_identity(Some("svc"), &config).unwrap();
        let request = build_request(&args(Some("svc")), &identity, &config).unwrap();
        assert_eq!(request.startup, StartupMode::Disabled);
    }

    #[test]
    fn bad_config_startup_is_a_config_error() {
        let mut config = AppConfig::default();
        config.provision.startup = "sometimes".into();
        let identity = resolve_identity(Some("svc"), &config).unwrap();
        assert!(matches!(
            build_request(&args(Some("svc")), &identity, &config),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn base_flag_overrides_config() {
        let mut a = args(Some("svc"));
        a.base = Some(std::path::PathBuf::from("/elsewhere"));
        let identity = resolve_identity(Some("svc"), &AppConfig::default()).unwrap();
        let request = build_request(&a, &identity, &AppConfig::default()).unwrap();
        assert_eq!(request.base_dir, std::path::PathBuf::from("/elsewhere"));
        assert!(request.layout().root.starts_with("/elsewhere"));
    }

    #[test]
    fn zero_rotation_threshold_is_a_config_error() {
        let mut config = AppConfig::default();
        config.rotation.max_bytes = 0;
        let identity = resolve_identity(Some("svc"), &config).unwrap();
        assert!(matches!(
            build_request(&args(Some("svc")), &identity, &config),
            Err(CliError::ConfigError { .. })
        ));
    }

    // ── convert_startup ───────────────────────────────────────────────────

    #[test]
    fn startup_conversion_covers_all_variants() {
        assert_eq!(convert_startup(Startup::Auto), StartupMode::Auto);
        assert_eq!(convert_startup(Startup::Manual), StartupMode::Manual);
        assert_eq!(convert_startup(Startup::Disabled), StartupMode::Disabled);
    }
}
