//! Entry-point management
//!
//! Adding an entry point touches three records that must stay in step:
//! the `exports` subpath, the `files` list, and the bundler `entry`. Each entry
//! point also gets a stub `package.json` in its own directory so deep imports
//! (`pkg/<name>`) resolve for tooling that ignores `exports`.

use crate::error::{Result, ScaffoldError};
use crate::manifest::{store, Manifest, ProjectManifest};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, info};

/// Version written to a stub when the root manifest has none
const DEFAULT_VERSION: &str = "1.0.0";

/// Project paths an entry-point directory would shadow
const RESERVED_NAMES: &[&str] = &["package.json", "src", "dist", "node_modules"];

/// Minimal manifest placed at `<name>/package.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubManifest {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub main: String,
    pub module: String,
    pub types: String,
    pub files: Vec<String>,
}

impl StubManifest {
    pub fn for_entry_point(parent: &Manifest, entry_point: &str) -> Self {
        Self {
            name: format!("{}-{}", parent.name().unwrap_or_default(), entry_point),
            version: parent.version().unwrap_or(DEFAULT_VERSION).to_string(),
            module_type: "module".to_string(),
            main: format!("../dist/{}.cjs", entry_point),
            module: format!("../dist/{}.js", entry_point),
            types: format!("../dist/{}.d.ts", entry_point),
            files: vec!["../dist".to_string()],
        }
    }
}

/// Source file compiled for an entry point, relative to the project root
pub fn source_path(entry_point: &str) -> String {
    format!("src/{}.ts", entry_point)
}

/// Reject names that cannot be both an export subpath and a file stem
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." || name.starts_with('.') {
        Some("name cannot start with '.'")
    } else if name.contains(['/', '\\']) {
        Some("name cannot contain path separators")
    } else if name.chars().any(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else if RESERVED_NAMES.contains(&name) {
        Some("name is reserved for a project path")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ScaffoldError::InvalidEntryPoint {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Apply one entry point to the in-memory project and return its stub manifest.
///
/// Every shape check happens before the first mutation, so an error leaves
/// `project` exactly as it was.
pub fn apply_entry_point(project: &mut ProjectManifest, name: &str) -> Result<StubManifest> {
    validate_name(name)?;
    let target = project.root().join(name);
    if target.exists() && !target.is_dir() {
        return Err(ScaffoldError::InvalidEntryPoint {
            name: name.to_string(),
            reason: "a file with that name already exists",
        });
    }
    project.manifest.check_entry_point_fields()?;

    let exports = project.manifest.exports_mut()?;
    exports.insert(
        format!("./{}", name),
        json!({
            "import": format!("./dist/{}.js", name),
            "require": format!("./dist/{}.cjs", name),
        }),
    );

    let files = project.manifest.files_mut()?;
    if !files.iter().any(|f| f.as_str() == Some(name)) {
        files.push(Value::String(name.to_string()));
    }

    project
        .build_config_mut()
        .entry_mut()
        .add(name, &source_path(name));

    debug!("Applied entry point {}", name);
    Ok(StubManifest::for_entry_point(&project.manifest, name))
}

/// Write the stub manifest, then create the entry point's source file if absent
pub async fn write_entry_point_files(root: &Path, name: &str, stub: &StubManifest) -> Result<()> {
    store::write_json(&root.join(name).join(store::MANIFEST_FILE), stub).await?;
    store::touch(&root.join(source_path(name))).await
}

/// Add a single entry point: read the manifest, apply, write everything back
pub async fn add_entry_point(root: &Path, name: &str) -> Result<StubManifest> {
    let mut project = ProjectManifest::load(root).await?;
    let stub = apply_entry_point(&mut project, name)?;
    write_entry_point_files(root, name, &stub).await?;
    project.save().await?;
    info!("Added entry point {}", name);
    Ok(stub)
}

/// Add several entry points against one in-memory manifest and write it once.
///
/// Nothing is written unless every name applies cleanly.
pub async fn add_entry_points<S: AsRef<str>>(root: &Path, names: &[S]) -> Result<Vec<StubManifest>> {
    let mut project = ProjectManifest::load(root).await?;
    let mut stubs = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        stubs.push((name, apply_entry_point(&mut project, name)?));
    }

    for (name, stub) in &stubs {
        write_entry_point_files(root, name, stub).await?;
    }
    project.save().await?;
    info!("Added {} entry point(s)", stubs.len());

    Ok(stubs.into_iter().map(|(_, stub)| stub).collect())
}

/// Split a line of user input into names, shell style: whitespace separates,
/// quotes group, backslash escapes the next character
pub fn split_names(input: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"') | None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    names.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        names.push(current);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("foo").is_ok());
        assert!(validate_name("foo-bar_2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("a b").is_err());
        assert!(validate_name("package.json").is_err());
        assert!(validate_name("src").is_err());
        assert!(validate_name("node_modules").is_err());
        assert!(validate_name("dist").is_err());
    }

    #[test]
    fn test_stub_defaults_version() {
        let parent = Manifest::from_value(json!({ "name": "lib" })).unwrap();
        let stub = StubManifest::for_entry_point(&parent, "foo");
        assert_eq!(stub.name, "lib-foo");
        assert_eq!(stub.version, "1.0.0");
        assert_eq!(stub.types, "../dist/foo.d.ts");
    }

    #[test]
    fn test_stub_serializes_type_field() {
        let parent = Manifest::from_value(json!({ "name": "lib", "version": "2.1.0" })).unwrap();
        let value = serde_json::to_value(StubManifest::for_entry_point(&parent, "foo")).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "lib-foo",
                "version": "2.1.0",
                "type": "module",
                "main": "../dist/foo.cjs",
                "module": "../dist/foo.js",
                "types": "../dist/foo.d.ts",
                "files": ["../dist"]
            })
        );
    }

    #[test]
    fn test_split_names() {
        assert_eq!(split_names("foo bar"), ["foo", "bar"]);
        assert_eq!(split_names("  foo\tbar  "), ["foo", "bar"]);
        assert_eq!(split_names(r#""foo bar" 'baz'"#), ["foo bar", "baz"]);
        assert_eq!(split_names(r"foo\ bar"), ["foo bar"]);
        assert_eq!(split_names("''"), [""]);
        assert!(split_names("   ").is_empty());
    }
}
