//! Production service control via the NSSM service-wrapper utility.
//!
//! NSSM registers an arbitrary executable as a Windows service and
//! supervises it. One `nssm set` invocation per parameter; the mapping from
//! [`ServiceDefinition`] fields to NSSM parameter names lives entirely in
//! this adapter.

use std::path::Path;

use servstrap_core::{
    application::ports::ServiceControl,
    domain::{ServiceDefinition, ServiceState, StartupMode},
    error::ServstrapResult,
};
use tracing::{debug, info};

use crate::process;

/// Shells out to a configured `nssm` binary.
#[derive(Debug, Clone)]
pub struct NssmServiceControl {
    nssm: String,
}

impl NssmServiceControl {
    /// `nssm` is the program name or path of the utility, usually just
    /// `"nssm"`.
    pub fn new(nssm: impl Into<String>) -> Self {
        Self { nssm: nssm.into() }
    }

    fn set(&self, name: &str, parameter: &str, value: &str) -> ServstrapResult<()> {
        debug!(service = name, parameter, value, "nssm set");
        process::run_checked(&self.nssm, &self.nssm, ["set", name, parameter, value])
    }
}

/// NSSM's name for a startup mode.
fn start_value(mode: StartupMode) -> &'static str {
    match mode {
        StartupMode::Auto => "SERVICE_AUTO_START",
        StartupMode::Manual => "SERVICE_DEMAND_START",
        StartupMode::Disabled => "SERVICE_DISABLED",
    }
}

/// Parse the state token `nssm status` prints.
fn parse_state(stdout: &str) -> ServiceState {
    match stdout.trim() {
        "SERVICE_RUNNING" | "SERVICE_START_PENDING" => ServiceState::Running,
        "SERVICE_STOPPED" | "SERVICE_STOP_PENDING" => ServiceState::Stopped,
        "SERVICE_PAUSED" | "SERVICE_PAUSE_PENDING" | "SERVICE_CONTINUE_PENDING" => {
            ServiceState::Paused
        }
        _ => ServiceState::Unknown,
    }
}

impl ServiceControl for NssmServiceControl {
    fn tool(&self) -> &str {
        &self.nssm
    }

    fn available(&self) -> bool {
        // NSSM prints usage and exits non-zero when run bare; being able to
        // launch it at all is the availability test.
        process::launchable(&self.nssm, std::iter::empty::<&str>())
    }

    fn query(&self, name: &str) -> ServstrapResult<ServiceState> {
        let captured = process::capture(&self.nssm, &self.nssm, ["status", name])?;
        if !captured.success {
            // NSSM cannot open a service that is not registered.
            return Ok(ServiceState::NotInstalled);
        }
        Ok(parse_state(&captured.stdout))
    }

    fn stop(&self, name: &str) -> ServstrapResult<()> {
        info!(service = name, "Stopping service");
        process::run_checked(&self.nssm, &self.nssm, ["stop", name])
    }

    fn remove(&self, name: &str) -> ServstrapResult<()> {
        info!(service = name, "Removing service registration");
        process::run_checked(&self.nssm, &self.nssm, ["remove", name, "confirm"])
    }

    fn install(&self, name: &str, application: &Path, parameters: &str) -> ServstrapResult<()> {
        info!(service = name, application = %application.display(), "Installing service");
        let application = application.display().to_string();
        process::run_checked(
            &self.nssm,
            &self.nssm,
            ["install", name, application.as_str(), parameters],
        )
    }

    fn configure(&self, definition: &ServiceDefinition) -> ServstrapResult<()> {
        let name = definition.name.as_str();

        self.set(name, "AppDirectory", &definition.working_dir.display().to_string())?;
        self.set(name, "AppParameters", &definition.parameters)?;
        self.set(name, "DisplayName", &definition.display_name)?;
        self.set(name, "Description", &definition.description)?;
        self.set(name, "Start", start_value(definition.startup))?;

        // Redirected output with rotation by age or size, whichever first.
        self.set(name, "AppStdout", &definition.stdout_log.display().to_string())?;
        self.set(name, "AppStderr", &definition.stderr_log.display().to_string())?;
        self.set(name, "AppRotateFiles", "1")?;
        self.set(
            name,
            "AppRotateSeconds",
            &definition.rotation.max_age_secs.to_string(),
        )?;
        self.set(
            name,
            "AppRotateBytes",
            &definition.rotation.max_bytes.to_string(),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_reports_configured_program() {
        let control = NssmServiceControl::new(r"C:\tools\nssm.exe");
        assert_eq!(control.tool(), r"C:\tools\nssm.exe");
    }

    #[test]
    fn unresolvable_utility_is_unavailable() {
        let control = NssmServiceControl::new("servstrap-definitely-not-a-real-binary");
        assert!(!control.available());
    }

    #[test]
    fn state_tokens_parse() {
        assert_eq!(parse_state("SERVICE_RUNNING\r\n"), ServiceState::Running);
        assert_eq!(parse_state("SERVICE_STOPPED"), ServiceState::Stopped);
        assert_eq!(parse_state("SERVICE_PAUSED"), ServiceState::Paused);
        assert_eq!(parse_state("something else"), ServiceState::Unknown);
    }

    #[test]
    fn startup_modes_map_to_nssm_names() {
        assert_eq!(start_value(StartupMode::Auto), "SERVICE_AUTO_START");
        assert_eq!(start_value(StartupMode::Manual), "SERVICE_DEMAND_START");
        assert_eq!(start_value(StartupMode::Disabled), "SERVICE_DISABLED");
    }
}
