//! Scaffold Core - library behind the `ts-scaffold` CLI
//!
//! Scaffolds dual ESM/CJS TypeScript library packages: writes the package
//! manifest, copies starter templates, drives the chosen package manager, and
//! manages additional entry points.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - manifest storage, entry-point bookkeeping,
//!   template filtering/copying, the package-manager registry
//! - **Layer 2: Workflow Orchestration** - `commands`, generic over the
//!   `Prompter`/`Reporter` collaborators and a `CommandRunner`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::entry_points;
//!
//! // Adds exports["./utils"], files += "utils", tsup entry src/utils.ts
//! // and writes utils/package.json
//! entry_points::add_entry_point(project_root, "utils").await?;
//! ```

pub mod commands;
pub mod config;
pub mod entry_points;
pub mod error;
pub mod manifest;
pub mod package_managers;
pub mod prompt;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::Settings;
pub use error::{is_cancellation, Result, ScaffoldError};
pub use manifest::{BuildConfig, Entry, Manifest, ProjectManifest};
pub use package_managers::{CommandRunner, PackageManager, ProcessRunner};
pub use prompt::{Prompter, Reporter};
pub use templates::{CopyOptions, CopyOutcome, TemplateCatalog, TemplateDescriptor, VariantFlags};

#[cfg(feature = "tui")]
pub use tui::ClackUi;
