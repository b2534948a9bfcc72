//! Runtime settings: where the project lives and where templates come from

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "TS_SCAFFOLD_TEMPLATE_DIR";

/// Directory name looked up next to the running executable
pub const TEMPLATE_DIR_NAME: &str = "templates";

/// Resolved settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Project root; every manifest and template path is relative to it
    pub project_root: PathBuf,
    /// Root of the template tree (`base/`, `package-managers/<id>/`)
    pub template_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from flags, the environment, and the install layout.
    ///
    /// `bundled` is the template directory known at build time, used last.
    pub fn resolve(
        project_root: Option<PathBuf>,
        template_dir: Option<PathBuf>,
        bundled: &Path,
    ) -> Result<Self> {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let absolute = |p: PathBuf| {
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        };

        let project_root = absolute(project_root.unwrap_or_else(|| current_dir.clone()));
        if !project_root.is_dir() {
            return Err(ScaffoldError::NotFound(project_root));
        }

        let exe_templates = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(TEMPLATE_DIR_NAME)));
        let template_dir = absolute(select_template_dir(
            template_dir,
            std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from),
            exe_templates,
            bundled,
        ));
        if !template_dir.is_dir() {
            return Err(ScaffoldError::NotFound(template_dir));
        }

        debug!(
            "Project root {}, templates from {}",
            project_root.display(),
            template_dir.display()
        );
        Ok(Self {
            project_root,
            template_dir,
        })
    }
}

/// Pick the template directory: flag, then environment, then next to the
/// executable (only if it exists), then the bundled path
pub fn select_template_dir(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    beside_exe: Option<PathBuf>,
    bundled: &Path,
) -> PathBuf {
    flag.or(env.filter(|p| !p.as_os_str().is_empty()))
        .or(beside_exe.filter(|p| p.is_dir()))
        .unwrap_or_else(|| bundled.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flag_wins() {
        let dir = select_template_dir(
            Some("flag".into()),
            Some("env".into()),
            None,
            Path::new("bundled"),
        );
        assert_eq!(dir, PathBuf::from("flag"));
    }

    #[test]
    fn test_env_before_exe() {
        let exe = TempDir::new().unwrap();
        let dir = select_template_dir(
            None,
            Some("env".into()),
            Some(exe.path().to_path_buf()),
            Path::new("bundled"),
        );
        assert_eq!(dir, PathBuf::from("env"));
    }

    #[test]
    fn test_missing_exe_dir_falls_back_to_bundled() {
        let dir = select_template_dir(
            None,
            Some(PathBuf::new()),
            Some("/definitely/not/here".into()),
            Path::new("bundled"),
        );
        assert_eq!(dir, PathBuf::from("bundled"));
    }

    #[test]
    fn test_resolve_missing_template_dir() {
        let project = TempDir::new().unwrap();
        let err = Settings::resolve(
            Some(project.path().to_path_buf()),
            Some(project.path().join("nope")),
            Path::new("bundled"),
        )
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::NotFound(_)));
    }

    #[test]
    fn test_resolve_ok() {
        let project = TempDir::new().unwrap();
        let templates = TempDir::new().unwrap();
        let settings = Settings::resolve(
            Some(project.path().to_path_buf()),
            Some(templates.path().to_path_buf()),
            Path::new("bundled"),
        )
        .unwrap();
        assert_eq!(settings.project_root, project.path());
        assert_eq!(settings.template_dir, templates.path());
    }
}
