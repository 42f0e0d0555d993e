//! The on-disk layout a provisioned project occupies.
//!
//! Every path is derived from exactly two inputs: the automation base
//! directory and the validated project identity. Nothing else may influence
//! where files land — the root is always `base.join(name)`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::identity::ProjectIdentity;

/// Directory name of the isolated runtime environment under the root.
pub const ENV_DIR: &str = "venv";
/// The service's entry-point script, expected at the project root.
pub const ENTRY_POINT: &str = "main.py";
/// The dependency manifest, consumed (never produced) from the project root.
pub const MANIFEST: &str = "requirements.txt";
/// Directory receiving the service's redirected output.
pub const LOGS_DIR: &str = "logs";
/// Captured standard output.
pub const STDOUT_LOG: &str = "stdout.log";
/// Captured standard error.
pub const STDERR_LOG: &str = "stderr.log";

/// All paths belonging to one provisioned project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLayout {
    /// `<base>/<project>`.
    pub root: PathBuf,
    /// `<root>/venv` — destroyed and rebuilt on every provisioning run.
    pub env_dir: PathBuf,
    /// `<root>/main.py` — supplied by the operator, checked not created.
    pub entry_point: PathBuf,
    /// `<root>/requirements.txt` — consumed when present.
    pub manifest: PathBuf,
    /// `<root>/logs`.
    pub logs_dir: PathBuf,
    /// `<logs>/stdout.log`.
    pub stdout_log: PathBuf,
    /// `<logs>/stderr.log`.
    pub stderr_log: PathBuf,
}

impl ProjectLayout {
    /// Derive the full layout for `identity` under `base`.
    pub fn derive(base: &Path, identity: &ProjectIdentity) -> Self {
        let root = base.join(identity.name().as_str());
        let logs_dir = root.join(LOGS_DIR);
        Self {
            env_dir: root.join(ENV_DIR),
            entry_point: root.join(ENTRY_POINT),
            manifest: root.join(MANIFEST),
            stdout_log: logs_dir.join(STDOUT_LOG),
            stderr_log: logs_dir.join(STDERR_LOG),
            logs_dir,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(name: &str, base: &str) -> ProjectLayout {
        let identity = ProjectIdentity::parse(name).unwrap();
        ProjectLayout::derive(Path::new(base), &identity)
    }

    #[test]
    fn root_is_base_joined_with_name() {
        let layout = layout_for("billing-sync", "/srv/automation");
        assert_eq!(layout.root, PathBuf::from("/srv/automation/billing-sync"));
    }

    #[test]
    fn derived_paths_live_under_root() {
        let layout = layout_for("billing-sync", "/srv/automation");
        for path in [
            &layout.env_dir,
            &layout.entry_point,
            &layout.manifest,
            &layout.logs_dir,
            &layout.stdout_log,
            &layout.stderr_log,
        ] {
            assert!(path.starts_with(&layout.root), "escaped root: {path:?}");
        }
    }

    #[test]
    fn well_known_leaf_names() {
        let layout = layout_for("billing-sync", "/base");
        assert!(layout.env_dir.ends_with("venv"));
        assert!(layout.entry_point.ends_with("main.py"));
        assert!(layout.manifest.ends_with("requirements.txt"));
        assert!(layout.stdout_log.ends_with("logs/stdout.log"));
        assert!(layout.stderr_log.ends_with("logs/stderr.log"));
    }
}
