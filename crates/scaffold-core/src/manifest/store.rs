//! Whole-file JSON reads and writes

use crate::error::{Result, ScaffoldError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::model::Manifest;

/// Name of the package manifest inside a project or entry-point directory
pub const MANIFEST_FILE: &str = "package.json";

/// Optional standalone bundler configuration next to the manifest
pub const BUILD_CONFIG_FILE: &str = "tsup.config.json";

/// Read and parse a JSON file
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading {}", path.display());
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| ScaffoldError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize with 2-space indentation and write, creating parent directories
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| ScaffoldError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    write_file(path, content.as_bytes()).await
}

/// Write raw bytes, creating parent directories
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::io(parent, e))?;
    }
    debug!("Writing {}", path.display());
    fs::write(path, contents)
        .await
        .map_err(|e| ScaffoldError::io(path, e))
}

/// Create an empty file if it does not exist. Existing content is never truncated.
pub async fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::io(parent, e))?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| ScaffoldError::io(path, e))?;
    file.flush().await.map_err(|e| ScaffoldError::io(path, e))
}

/// Read `<dir>/package.json`
pub async fn read_manifest(dir: &Path) -> Result<Manifest> {
    let value = read_json(&dir.join(MANIFEST_FILE)).await?;
    Manifest::from_value(value)
}

/// Write `<dir>/package.json`, creating `dir` if needed
pub async fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<()> {
    write_json(&dir.join(MANIFEST_FILE), manifest.as_map()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_manifest(dir.path()).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        let err = read_manifest(dir.path()).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs_with_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        let manifest = Manifest::from_value(json!({ "name": "lib" })).unwrap();
        write_manifest(&nested, &manifest).await.unwrap();

        let content = std::fs::read_to_string(nested.join(MANIFEST_FILE)).unwrap();
        assert_eq!(content, "{\n  \"name\": \"lib\"\n}\n");
    }

    #[tokio::test]
    async fn test_touch_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src/index.ts");
        touch(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        std::fs::write(&path, "export const a = 1;\n").unwrap();
        touch(&path).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export const a = 1;\n"
        );
    }

    #[tokio::test]
    async fn test_read_json_generic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(BUILD_CONFIG_FILE);
        write_json(&path, &json!({ "dts": true })).await.unwrap();
        let value: Value = read_json(&path).await.unwrap();
        assert_eq!(value, json!({ "dts": true }));
    }

    #[tokio::test]
    async fn test_unserializable_value_is_serialize_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let value = std::collections::BTreeMap::from([((1, 2), "pair")]);

        let err = write_json(&path, &value).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Serialize { .. }));
        assert!(err.to_string().starts_with("Failed to serialize"));
        assert!(!path.exists());
    }
}
