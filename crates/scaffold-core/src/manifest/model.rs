//! In-memory package manifest and bundler configuration

use crate::error::{Result, ScaffoldError};
use serde_json::{Map, Value};

/// A project's `package.json`, kept as an ordered JSON object so unknown
/// fields and key order survive a read-modify-write cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Wrap a parsed JSON document; the top level must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ScaffoldError::shape("package.json", "an object")),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.fields.get("version").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a top-level field, keeping its position when it already exists
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// The `exports` map, created empty when absent
    pub fn exports_mut(&mut self) -> Result<&mut Map<String, Value>> {
        match self
            .fields
            .entry("exports")
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(map) => Ok(map),
            _ => Err(ScaffoldError::shape("exports", "an object")),
        }
    }

    /// The `files` list, created empty when absent
    pub fn files_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self
            .fields
            .entry("files")
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(files) => Ok(files),
            _ => Err(ScaffoldError::shape("files", "an array")),
        }
    }

    /// Check the fields entry-point bookkeeping touches without mutating anything
    pub fn check_entry_point_fields(&self) -> Result<()> {
        match self.fields.get("exports") {
            None | Some(Value::Object(_)) => {}
            Some(_) => return Err(ScaffoldError::shape("exports", "an object")),
        }
        match self.fields.get("files") {
            None | Some(Value::Array(_)) => {}
            Some(_) => return Err(ScaffoldError::shape("files", "an array")),
        }
        Ok(())
    }
}

/// The `entry` option of the bundler configuration. Either shape is kept as is;
/// adding an entry never converts one into the other.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    List(Vec<String>),
    Named(Map<String, Value>),
}

impl Entry {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(ScaffoldError::shape("tsup.entry", "a list of paths")),
                })
                .collect::<Result<Vec<_>>>()
                .map(Entry::List),
            Value::Object(map) => {
                if map.values().all(Value::is_string) {
                    Ok(Entry::Named(map))
                } else {
                    Err(ScaffoldError::shape("tsup.entry", "a map of paths"))
                }
            }
            _ => Err(ScaffoldError::shape("tsup.entry", "an array or an object")),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Entry::List(paths) => Value::Array(paths.iter().cloned().map(Value::String).collect()),
            Entry::Named(map) => Value::Object(map.clone()),
        }
    }

    /// Register `path` for entry point `name`; repeated calls are idempotent
    pub fn add(&mut self, name: &str, path: &str) {
        match self {
            Entry::List(paths) => {
                if !paths.iter().any(|p| p == path) {
                    paths.push(path.to_string());
                }
            }
            Entry::Named(map) => {
                map.insert(name.to_string(), Value::String(path.to_string()));
            }
        }
    }

    pub fn contains_path(&self, path: &str) -> bool {
        match self {
            Entry::List(paths) => paths.iter().any(|p| p == path),
            Entry::Named(map) => map.values().any(|v| v.as_str() == Some(path)),
        }
    }
}

/// Bundler (tsup) configuration. Options other than `entry` are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub entry: Option<Entry>,
    options: Map<String, Value>,
}

impl BuildConfig {
    /// A fresh copy of the default configuration written by `init`
    pub fn default_config() -> Self {
        let mut options = Map::new();
        options.insert("entry".into(), Value::Null);
        options.insert("sourcemap".into(), Value::Bool(true));
        options.insert(
            "format".into(),
            Value::Array(vec![Value::from("esm"), Value::from("cjs")]),
        );
        options.insert("dts".into(), Value::Bool(true));
        options.insert("minify".into(), Value::Bool(true));
        Self {
            entry: Some(Entry::List(vec!["src/index.ts".to_string()])),
            options,
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut options) = value else {
            return Err(ScaffoldError::shape("tsup", "an object"));
        };
        let entry = match options.get_mut("entry") {
            Some(slot) => Some(Entry::from_value(slot.take())?),
            None => None,
        };
        Ok(Self { entry, options })
    }

    pub fn to_value(&self) -> Value {
        let mut options = self.options.clone();
        match &self.entry {
            // Existing key keeps its position
            Some(entry) => {
                options.insert("entry".into(), entry.to_value());
            }
            None => {
                options.shift_remove("entry");
            }
        }
        Value::Object(options)
    }

    /// The entry option, created as an empty list when absent
    pub fn entry_mut(&mut self) -> &mut Entry {
        self.entry.get_or_insert_with(|| Entry::List(Vec::new()))
    }
}
