//! Template discovery, filtering, and copying
//!
//! This module provides:
//! - Template catalog types (TemplateCatalog, TemplateDescriptor)
//! - Variant-block filtering for optional framework code
//! - Template copying with overwrite confirmation

pub mod catalog;
pub mod copier;
pub mod variants;

pub use catalog::{TemplateCatalog, TemplateDescriptor};
pub use copier::{copy_template, copy_templates, CopyOptions, CopyOutcome, Overwrite};
pub use variants::{apply_variants, filter_variant, VariantFlags, KNOWN_VARIANTS};
