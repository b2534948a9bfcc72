//! Project manifest model and storage
//!
//! This module provides:
//! - The ordered `package.json` model and the dual-shape bundler `entry`
//! - Whole-file JSON read/write helpers
//! - `ProjectManifest`, which pairs the manifest with its bundler configuration

pub mod model;
pub mod project;
pub mod store;

pub use model::{BuildConfig, Entry, Manifest};
pub use project::{BuildConfigLocation, ProjectManifest, BUILD_CONFIG_KEY};
pub use store::{
    read_json, read_manifest, touch, write_file, write_json, write_manifest, BUILD_CONFIG_FILE,
    MANIFEST_FILE,
};
