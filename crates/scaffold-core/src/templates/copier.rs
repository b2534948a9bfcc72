//! Template file copying with overwrite confirmation and variant filtering

use crate::error::{Result, ScaffoldError};
use crate::manifest::store;
use crate::prompt::Prompter;
use crate::templates::catalog::{TemplateCatalog, TemplateDescriptor};
use crate::templates::variants::{apply_variants, VariantFlags};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// What to do when the destination already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Ask the user first
    #[default]
    Prompt,
    /// Replace without asking
    Always,
    /// Leave the existing file alone
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    pub overwrite: Overwrite,
    pub variants: VariantFlags,
}

impl CopyOptions {
    /// `true` asks before replacing an existing file, `false` replaces silently
    pub fn prompt_before_overwrite(prompt: bool) -> Self {
        Self {
            overwrite: if prompt {
                Overwrite::Prompt
            } else {
                Overwrite::Always
            },
            variants: VariantFlags::default(),
        }
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_variants(mut self, variants: VariantFlags) -> Self {
        self.variants = variants;
        self
    }
}

/// Result of copying one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Skipped,
    Failed(String),
}

impl fmt::Display for CopyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyOutcome::Copied => write!(f, "copied"),
            CopyOutcome::Skipped => write!(f, "skipped"),
            CopyOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Copy one template into `target_dir`.
///
/// Failures are reported as `CopyOutcome::Failed`; only a cancelled prompt
/// comes back as an error, since that ends the whole run.
pub async fn copy_template<P: Prompter>(
    catalog: &TemplateCatalog,
    template: &TemplateDescriptor,
    target_dir: &Path,
    options: &CopyOptions,
    prompter: &mut P,
) -> Result<CopyOutcome> {
    match try_copy(catalog, template, target_dir, options, prompter).await {
        Ok(outcome) => Ok(outcome),
        Err(ScaffoldError::Cancelled) => Err(ScaffoldError::Cancelled),
        Err(e) => {
            debug!("Copying {} failed: {}", template, e);
            Ok(CopyOutcome::Failed(e.to_string()))
        }
    }
}

/// Copy several templates in order. One failure does not stop the rest.
pub async fn copy_templates<P: Prompter>(
    catalog: &TemplateCatalog,
    templates: &[TemplateDescriptor],
    target_dir: &Path,
    options: &CopyOptions,
    prompter: &mut P,
) -> Result<Vec<(TemplateDescriptor, CopyOutcome)>> {
    let mut outcomes = Vec::with_capacity(templates.len());
    for template in templates {
        let outcome = copy_template(catalog, template, target_dir, options, prompter).await?;
        outcomes.push((template.clone(), outcome));
    }
    Ok(outcomes)
}

async fn try_copy<P: Prompter>(
    catalog: &TemplateCatalog,
    template: &TemplateDescriptor,
    target_dir: &Path,
    options: &CopyOptions,
    prompter: &mut P,
) -> Result<CopyOutcome> {
    let source_path = catalog.source_path(template);
    let target_path = target_dir.join(&template.filename);

    if !catalog.contains(template) {
        return Err(ScaffoldError::UnknownTemplate(template.to_string()));
    }

    if target_path.exists() {
        let replace = match options.overwrite {
            Overwrite::Always => true,
            Overwrite::Never => false,
            Overwrite::Prompt => prompter.confirm(
                &format!("{} already exists, overwrite?", template.filename),
                false,
            )?,
        };
        if !replace {
            debug!("Keeping existing {}", target_path.display());
            return Ok(CopyOutcome::Skipped);
        }
    }

    let raw = fs::read(&source_path)
        .await
        .map_err(|e| ScaffoldError::io(&source_path, e))?;

    // Non-UTF-8 templates are copied byte for byte
    let contents = match String::from_utf8(raw) {
        Ok(text) => apply_variants(&text, &options.variants)
            .into_owned()
            .into_bytes(),
        Err(e) => e.into_bytes(),
    };

    store::write_file(&target_path, &contents).await?;
    debug!("Copied {} to {}", template, target_path.display());
    Ok(CopyOutcome::Copied)
}
