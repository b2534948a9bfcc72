//! `copy-templates` / `copy-template`: copy starter files into an existing project

use crate::config::Settings;
use crate::error::ScaffoldError;
use crate::prompt::{Prompter, Reporter};
use crate::templates::{
    copy_template, CopyOptions, CopyOutcome, TemplateCatalog, TemplateDescriptor, VariantFlags,
};
use anyhow::{Context, Result};
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct CopyTemplatesArgs {
    /// Replace existing files without asking
    pub yes: bool,
    /// Include React code; asked interactively when `None`
    pub react: Option<bool>,
    /// `file` or `<manager>:file`; chosen interactively when empty
    pub filenames: Vec<String>,
}

pub async fn copy_templates<U>(
    settings: &Settings,
    args: CopyTemplatesArgs,
    ui: &mut U,
) -> Result<Vec<(TemplateDescriptor, CopyOutcome)>>
where
    U: Prompter + Reporter,
{
    ui.intro("Copy templates")?;
    let catalog = TemplateCatalog::load(&settings.template_dir)
        .context("Failed to load templates")?;

    let react = match args.react {
        Some(react) => react,
        None => ui.confirm("Include React code?", false)?,
    };

    let requested = if args.filenames.is_empty() {
        let items: Vec<(TemplateDescriptor, String)> = catalog
            .templates()
            .iter()
            .map(|t| (t.clone(), t.label()))
            .collect();
        ui.multiselect("Which templates should be copied?", &items)?
    } else {
        parse_requested(&args.filenames, ui)?
    };

    let mut selected = Vec::with_capacity(requested.len());
    for template in requested {
        if catalog.contains(&template) {
            selected.push(template);
        } else {
            ui.info(&format!(
                "{} is not a valid template and will be ignored",
                format!("\"{}\"", template).red()
            ))?;
        }
    }

    let options = CopyOptions::prompt_before_overwrite(!args.yes)
        .with_variants(VariantFlags::new().with("react", react));

    let mut outcomes = Vec::with_capacity(selected.len());
    for template in selected {
        let outcome = copy_template(
            &catalog,
            &template,
            &settings.project_root,
            &options,
            ui,
        )
        .await?;
        report_outcome(ui, &template, &outcome)?;
        outcomes.push((template, outcome));
    }

    ui.outro("Done")?;
    Ok(outcomes)
}

/// Copy exactly one template, failing if it is unknown or cannot be copied
pub async fn copy_single_template<U>(
    settings: &Settings,
    filename: &str,
    yes: bool,
    react: bool,
    ui: &mut U,
) -> Result<CopyOutcome>
where
    U: Prompter + Reporter,
{
    ui.intro("Copy template")?;
    let catalog = TemplateCatalog::load(&settings.template_dir)
        .context("Failed to load templates")?;

    let template = TemplateDescriptor::parse(filename)?;
    if !catalog.contains(&template) {
        return Err(ScaffoldError::UnknownTemplate(template.to_string()).into());
    }

    let options = CopyOptions::prompt_before_overwrite(!yes)
        .with_variants(VariantFlags::new().with("react", react));
    let outcome = copy_template(
        &catalog,
        &template,
        &settings.project_root,
        &options,
        ui,
    )
    .await?;
    report_outcome(ui, &template, &outcome)?;

    if let CopyOutcome::Failed(reason) = &outcome {
        anyhow::bail!("Failed to copy template {}: {}", template, reason);
    }
    ui.outro("Done")?;
    Ok(outcome)
}

/// Parse each argument, warning about and dropping unsupported manager prefixes
fn parse_requested<U: Reporter>(
    filenames: &[String],
    ui: &mut U,
) -> Result<Vec<TemplateDescriptor>> {
    let mut parsed = Vec::with_capacity(filenames.len());
    for arg in filenames {
        match TemplateDescriptor::parse(arg) {
            Ok(template) => parsed.push(template),
            Err(e) => ui.warning(&format!("{}; ignoring {}", e, arg.red()))?,
        }
    }
    Ok(parsed)
}

fn report_outcome<U: Reporter>(
    ui: &mut U,
    template: &TemplateDescriptor,
    outcome: &CopyOutcome,
) -> Result<()> {
    match outcome {
        CopyOutcome::Copied => ui.success(&format!("Template {} copied", template))?,
        CopyOutcome::Skipped => ui.info(&format!("Kept existing {}", template.filename))?,
        CopyOutcome::Failed(reason) => ui.error(&format!(
            "Failed to copy template: {} ({})",
            template, reason
        ))?,
    }
    Ok(())
}
