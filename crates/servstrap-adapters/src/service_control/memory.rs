//! In-memory service control for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use servstrap_core::{
    application::{ApplicationError, ports::ServiceControl},
    domain::{ServiceDefinition, ServiceState},
    error::ServstrapResult,
};

/// One fake registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredService {
    pub application: PathBuf,
    pub parameters: String,
    pub state: ServiceState,
    /// Present once `configure` has been applied.
    pub definition: Option<ServiceDefinition>,
}

/// In-memory service registry for testing.
///
/// Behaves like a tiny registry: `install` requires the name to be free,
/// `remove` requires it to exist, and every stop/remove call is recorded so
/// tests can assert the replacement sequence.
#[derive(Debug, Clone)]
pub struct MemoryServiceControl {
    inner: Arc<RwLock<MemoryServiceControlInner>>,
}

#[derive(Debug, Default)]
struct MemoryServiceControlInner {
    available: bool,
    fail_stop: bool,
    fail_install: bool,
    services: HashMap<String, RegisteredService>,
    stop_calls: Vec<String>,
    remove_calls: Vec<String>,
}

impl MemoryServiceControl {
    /// An available registry with no services.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryServiceControlInner {
                available: true,
                ..Default::default()
            })),
        }
    }

    /// Simulate a utility that does not resolve on the path.
    pub fn unavailable(self) -> Self {
        self.inner.write().unwrap().available = false;
        self
    }

    /// Script `stop` to fail.
    pub fn failing_stop(self) -> Self {
        self.inner.write().unwrap().fail_stop = true;
        self
    }

    /// Script `install` to fail.
    pub fn failing_install(self) -> Self {
        self.inner.write().unwrap().fail_install = true;
        self
    }

    /// Seed a pre-existing registration (testing helper).
    pub fn seed(&self, name: &str, state: ServiceState) {
        self.inner.write().unwrap().services.insert(
            name.to_string(),
            RegisteredService {
                application: PathBuf::from("legacy.exe"),
                parameters: String::new(),
                state,
                definition: None,
            },
        );
    }

    /// Snapshot of a registration, if any.
    pub fn registered(&self, name: &str) -> Option<RegisteredService> {
        self.inner.read().unwrap().services.get(name).cloned()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().services.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names `stop` was called with, in order.
    pub fn stop_calls(&self) -> Vec<String> {
        self.inner.read().unwrap().stop_calls.clone()
    }

    /// Names `remove` was called with, in order.
    pub fn remove_calls(&self) -> Vec<String> {
        self.inner.read().unwrap().remove_calls.clone()
    }
}

impl Default for MemoryServiceControl {
    fn default() -> Self {
        Self::new()
    }
}

fn tool_failure(detail: &str) -> ApplicationError {
    ApplicationError::ToolCommandFailed {
        tool: "nssm".into(),
        detail: detail.into(),
    }
}

impl ServiceControl for MemoryServiceControl {
    fn tool(&self) -> &str {
        "nssm"
    }

    fn available(&self) -> bool {
        self.inner.read().unwrap().available
    }

    fn query(&self, name: &str) -> ServstrapResult<ServiceState> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .services
            .get(name)
            .map_or(ServiceState::NotInstalled, |s| s.state))
    }

    fn stop(&self, name: &str) -> ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.stop_calls.push(name.to_string());
        if inner.fail_stop {
            return Err(tool_failure("scripted stop failure").into());
        }
        if let Some(service) = inner.services.get_mut(name) {
            service.state = ServiceState::Stopped;
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.remove_calls.push(name.to_string());
        if inner.services.remove(name).is_none() {
            return Err(tool_failure("no such service").into());
        }
        Ok(())
    }

    fn install(&self, name: &str, application: &Path, parameters: &str) -> ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.fail_install {
            return Err(tool_failure("scripted install failure").into());
        }
        if inner.services.contains_key(name) {
            return Err(tool_failure("service already exists").into());
        }
        inner.services.insert(
            name.to_string(),
            RegisteredService {
                application: application.to_path_buf(),
                parameters: parameters.to_string(),
                state: ServiceState::Stopped,
                definition: None,
            },
        );
        Ok(())
    }

    fn configure(&self, definition: &ServiceDefinition) -> ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();
        match inner.services.get_mut(&definition.name) {
            Some(service) => {
                service.definition = Some(definition.clone());
                Ok(())
            }
            None => Err(tool_failure("cannot configure a service that is not installed").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_of_unknown_service_is_not_installed() {
        let control = MemoryServiceControl::new();
        assert_eq!(
            control.query("ghost").unwrap(),
            ServiceState::NotInstalled
        );
    }

    #[test]
    fn install_then_query_reports_stopped() {
        let control = MemoryServiceControl::new();
        control
            .install("svc", Path::new("python.exe"), "main.py")
            .unwrap();
        assert_eq!(control.query("svc").unwrap(), ServiceState::Stopped);
    }

    #[test]
    fn duplicate_install_is_rejected() {
        let control = MemoryServiceControl::new();
        control
            .install("svc", Path::new("python.exe"), "main.py")
            .unwrap();
        assert!(control.install("svc", Path::new("other.exe"), "").is_err());
    }

    #[test]
    fn remove_of_unknown_service_is_an_error() {
        let control = MemoryServiceControl::new();
        assert!(control.remove("ghost").is_err());
    }

    #[test]
    fn stop_and_remove_calls_are_recorded() {
        let control = MemoryServiceControl::new();
        control.seed("svc", ServiceState::Running);
        control.stop("svc").unwrap();
        control.remove("svc").unwrap();
        assert_eq!(control.stop_calls(), vec!["svc"]);
        assert_eq!(control.remove_calls(), vec!["svc"]);
        assert!(control.is_empty());
    }

    #[test]
    fn configure_requires_installation() {
        use servstrap_core::domain::{
            ProjectIdentity, ProjectLayout, RotationPolicy, StartupMode,
        };

        let control = MemoryServiceControl::new();
        let identity = ProjectIdentity::parse("svc").unwrap();
        let layout = ProjectLayout::derive(Path::new("/base"), &identity);
        let definition = ServiceDefinition::for_project(
            &identity,
            &layout,
            layout.env_dir.join("bin/python"),
            "d",
            StartupMode::Auto,
            RotationPolicy::default(),
        );
        assert!(control.configure(&definition).is_err());

        control
            .install("svc", &definition.application, &definition.parameters)
            .unwrap();
        control.configure(&definition).unwrap();
        assert_eq!(
            control.registered("svc").unwrap().definition.unwrap().name,
            "svc"
        );
    }
}
