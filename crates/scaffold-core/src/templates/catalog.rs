//! Template discovery and descriptor parsing

use crate::error::{Result, ScaffoldError};
use crate::package_managers::PackageManager;
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding templates copied into every project
pub const BASE_DIR: &str = "base";

/// Directory holding one subdirectory of templates per package manager
pub const PACKAGE_MANAGER_DIR: &str = "package-managers";

/// A template file, identified by its relative path and owning manager.
/// A generic template and a manager-specific one may share a filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateDescriptor {
    pub filename: String,
    pub package_manager: Option<PackageManager>,
}

impl TemplateDescriptor {
    pub fn generic(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            package_manager: None,
        }
    }

    pub fn for_manager(filename: impl Into<String>, pm: PackageManager) -> Self {
        Self {
            filename: filename.into(),
            package_manager: Some(pm),
        }
    }

    /// Parse `filename` or `<manager>:filename`. Only the first `:` splits, so
    /// `yarn:a:b` names the yarn template `a:b`.
    pub fn parse(arg: &str) -> Result<Self> {
        match arg.split_once(':') {
            Some((prefix, filename)) if !filename.is_empty() => {
                let pm: PackageManager = prefix.parse()?;
                Ok(Self::for_manager(filename, pm))
            }
            _ => Ok(Self::generic(arg)),
        }
    }

    /// Label for selection lists, with the manager prefix emphasised
    pub fn label(&self) -> String {
        match self.package_manager {
            Some(pm) => format!("{}{}", format!("{}:", pm).bold().italic(), self.filename),
            None => self.filename.clone(),
        }
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.package_manager {
            Some(pm) => write!(f, "{}:{}", pm, self.filename),
            None => write!(f, "{}", self.filename),
        }
    }
}

/// The set of templates found under a template root directory
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
    templates: Vec<TemplateDescriptor>,
}

impl TemplateCatalog {
    /// Scan `root/base` and `root/package-managers/<id>` recursively
    pub fn load(root: &Path) -> Result<Self> {
        let base = root.join(BASE_DIR);
        if !base.is_dir() {
            return Err(ScaffoldError::NotFound(base));
        }

        let mut templates: Vec<TemplateDescriptor> = list_files(&base)?
            .into_iter()
            .map(TemplateDescriptor::generic)
            .collect();

        for pm in PackageManager::ALL {
            let dir = root.join(PACKAGE_MANAGER_DIR).join(pm.id());
            // No specific templates for this manager
            if !dir.is_dir() {
                continue;
            }
            templates.extend(
                list_files(&dir)?
                    .into_iter()
                    .map(|filename| TemplateDescriptor::for_manager(filename, pm)),
            );
        }

        Ok(Self {
            root: root.to_path_buf(),
            templates,
        })
    }

    pub fn templates(&self) -> &[TemplateDescriptor] {
        &self.templates
    }

    pub fn contains(&self, desc: &TemplateDescriptor) -> bool {
        self.templates.contains(desc)
    }

    /// Generic templates
    pub fn base(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates
            .iter()
            .filter(|t| t.package_manager.is_none())
    }

    /// Templates specific to `pm`
    pub fn for_manager(&self, pm: PackageManager) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates
            .iter()
            .filter(move |t| t.package_manager == Some(pm))
    }

    /// Where the source file for `desc` lives
    pub fn source_path(&self, desc: &TemplateDescriptor) -> PathBuf {
        let dir = match desc.package_manager {
            Some(pm) => self.root.join(PACKAGE_MANAGER_DIR).join(pm.id()),
            None => self.root.join(BASE_DIR),
        };
        dir.join(&desc.filename)
    }
}

/// Relative, `/`-separated paths of every file under `dir`, sorted
fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(dir) {
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            files.push(parts.join("/"));
        }
    }
    Ok(files)
}
