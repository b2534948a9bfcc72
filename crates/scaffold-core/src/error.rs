//! Error taxonomy shared by every scaffolding operation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by manifest, template and package-manager operations
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A manifest field exists but holds the wrong JSON shape
    #[error("`{field}` must be {expected}")]
    ConfigShape {
        field: String,
        expected: &'static str,
    },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{program} {}` exited with {}{}", .args.join(" "), format_code(.code), format_stderr(.stderr))]
    Command {
        program: String,
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid entry point name \"{name}\": {reason}")]
    InvalidEntryPoint { name: String, reason: &'static str },

    #[error("Unsupported package manager: {0}")]
    UnsupportedPackageManager(String),

    #[error("Template \"{0}\" not found")]
    UnknownTemplate(String),

    /// The user backed out of an interactive prompt
    #[error("Cancelled")]
    Cancelled,
}

impl ScaffoldError {
    /// Wrap an io error with the path it concerns, mapping `NotFound` to its own variant
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    pub fn shape(field: impl Into<String>, expected: &'static str) -> Self {
        Self::ConfigShape {
            field: field.into(),
            expected,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

fn format_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("code {}", c))
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}

/// Whether an error chain was caused by the user cancelling a prompt
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ScaffoldError>()
            .is_some_and(ScaffoldError::is_cancelled)
    })
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
