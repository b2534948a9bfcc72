//! A project's manifest together with wherever its bundler configuration lives

use crate::error::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::model::{BuildConfig, Manifest};
use super::store::{self, BUILD_CONFIG_FILE};

/// Key holding the inline bundler configuration in `package.json`
pub const BUILD_CONFIG_KEY: &str = "tsup";

/// Where the bundler configuration is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildConfigLocation {
    /// Under the manifest's `tsup` key
    Inline,
    /// A separate JSON file
    File(PathBuf),
}

/// The project manifest loaded for a read-modify-write cycle
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    root: PathBuf,
    pub manifest: Manifest,
    build_config: Option<BuildConfig>,
    location: BuildConfigLocation,
}

impl ProjectManifest {
    /// Load `package.json` (and `tsup.config.json` when present) from `root`
    pub async fn load(root: &Path) -> Result<Self> {
        let manifest = store::read_manifest(root).await?;
        let config_path = root.join(BUILD_CONFIG_FILE);

        let (build_config, location) = if config_path.is_file() {
            let value: Value = store::read_json(&config_path).await?;
            (
                Some(BuildConfig::from_value(value)?),
                BuildConfigLocation::File(config_path),
            )
        } else {
            let config = manifest
                .get(BUILD_CONFIG_KEY)
                .cloned()
                .map(BuildConfig::from_value)
                .transpose()?;
            (config, BuildConfigLocation::Inline)
        };

        debug!(
            "Loaded manifest from {} (build config {:?})",
            root.display(),
            location
        );

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            build_config,
            location,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn location(&self) -> &BuildConfigLocation {
        &self.location
    }

    pub fn build_config(&self) -> Option<&BuildConfig> {
        self.build_config.as_ref()
    }

    /// The bundler configuration, initialised from a fresh default when absent
    pub fn build_config_mut(&mut self) -> &mut BuildConfig {
        self.build_config
            .get_or_insert_with(BuildConfig::default_config)
    }

    /// Write the manifest, and the build config file when it lives separately
    pub async fn save(&mut self) -> Result<()> {
        match &self.location {
            BuildConfigLocation::Inline => {
                if let Some(config) = &self.build_config {
                    self.manifest.set(BUILD_CONFIG_KEY, config.to_value());
                }
            }
            BuildConfigLocation::File(path) => {
                if let Some(config) = &self.build_config {
                    store::write_json(path, &config.to_value()).await?;
                }
            }
        }
        store::write_manifest(&self.root, &self.manifest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_inline_config_written_back_under_tsup() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "lib", "version": "1.0.0" }"#,
        )
        .unwrap();

        let mut project = ProjectManifest::load(dir.path()).await.unwrap();
        assert_eq!(project.location(), &BuildConfigLocation::Inline);
        assert!(project.build_config().is_none());
        project.build_config_mut();
        project.save().await.unwrap();

        let saved: Value = store::read_json(&dir.path().join("package.json"))
            .await
            .unwrap();
        assert_eq!(saved["tsup"]["entry"], json!(["src/index.ts"]));
    }

    #[tokio::test]
    async fn test_separate_config_file_is_used() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{ "name": "lib" }"#).unwrap();
        std::fs::write(
            dir.path().join(BUILD_CONFIG_FILE),
            r#"{ "entry": { "index": "src/index.ts" } }"#,
        )
        .unwrap();

        let mut project = ProjectManifest::load(dir.path()).await.unwrap();
        assert!(matches!(project.location(), BuildConfigLocation::File(_)));
        project.build_config_mut().entry_mut().add("foo", "src/foo.ts");
        project.save().await.unwrap();

        let manifest: Value = store::read_json(&dir.path().join("package.json"))
            .await
            .unwrap();
        assert!(manifest.get("tsup").is_none());
        let config: Value = store::read_json(&dir.path().join(BUILD_CONFIG_FILE))
            .await
            .unwrap();
        assert_eq!(
            config["entry"],
            json!({ "index": "src/index.ts", "foo": "src/foo.ts" })
        );
    }
}
