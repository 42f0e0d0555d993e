//! Implementation of the `servstrap status` command.
//!
//! Read-only: queries the service registry and checks the on-disk layout,
//! without requiring elevation.

use tracing::instrument;

use servstrap_adapters::{HostPrivileges, LocalFilesystem, NssmServiceControl, VenvEnvironment};
use servstrap_core::{
    application::{ProvisionService, StatusReport},
    domain::ProjectIdentity,
    error::ServstrapError,
};

use crate::{
    cli::{StatusArgs, StatusFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `servstrap status` command.
#[instrument(skip_all, fields(project = args.project.as_deref().unwrap_or("<default>")))]
pub fn execute(
    args: StatusArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let raw = args
        .project
        .as_deref()
        .unwrap_or(&config.provision.default_project);
    let identity = ProjectIdentity::parse(raw).map_err(|e| CliError::Core(e.into()))?;
    let base = args
        .base
        .clone()
        .unwrap_or_else(|| config.provision.base_dir.clone());

    let service = ProvisionService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(VenvEnvironment::new(config.tools.python.clone())),
        Box::new(NssmServiceControl::new(config.tools.nssm.clone())),
        Box::new(HostPrivileges::new()),
    );

    let status = service.status(&identity, &base).map_err(CliError::Core)?;

    match args.format {
        StatusFormat::Json => print_json(&status, &output),
        StatusFormat::Table => print_table(&status, &output),
    }
}

fn print_json(status: &StatusReport, output: &OutputManager) -> CliResult<()> {
    let json = serde_json::to_string_pretty(status).map_err(|e| {
        CliError::Core(ServstrapError::Internal {
            message: format!("could not serialise status report: {e}"),
        })
    })?;
    output.print(&json)?;
    Ok(())
}

fn print_table(status: &StatusReport, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Status of '{}'", status.project))?;
    output.kv("Service:", status.service_state)?;
    output.kv("Root:", present(status.root_present, &status.layout.root))?;
    output.kv(
        "Environment:",
        present(status.environment_present, &status.layout.env_dir),
    )?;
    output.kv(
        "Entry point:",
        present(status.entry_point_present, &status.layout.entry_point),
    )?;
    output.kv(
        "Manifest:",
        present(status.manifest_present, &status.layout.manifest),
    )?;
    output.kv("Logs:", present(status.logs_present, &status.layout.logs_dir))?;
    Ok(())
}

fn present(exists: bool, path: &std::path::Path) -> String {
    if exists {
        format!("{} (present)", path.display())
    } else {
        format!("{} (missing)", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn present_marks_both_states() {
        assert!(present(true, Path::new("/x")).ends_with("(present)"));
        assert!(present(false, Path::new("/x")).ends_with("(missing)"));
    }
}
