//! Command orchestration
//!
//! Each command sequences the manifest, entry-point, template and
//! package-manager layers. They are generic over the interactive collaborators
//! so the same flow runs under the cliclack UI and in tests.

pub mod add_entrypoints;
pub mod copy_templates;
pub mod init;

pub use add_entrypoints::{add_entrypoints, prompt_entry_points};
pub use copy_templates::{copy_single_template, copy_templates, CopyTemplatesArgs};
pub use init::{configure_manifest, init, InitArgs};

use crate::prompt::{Reporter, StepMessages};
use crate::templates::{CopyOutcome, TemplateDescriptor};
use anyhow::Result;
use colored::Colorize;
use std::future::Future;

/// Run `step` behind a spinner, finishing it with the matching message
pub(crate) async fn with_step<U, T, F>(ui: &mut U, messages: StepMessages, step: F) -> Result<T>
where
    U: Reporter,
    F: Future<Output = Result<T>>,
{
    ui.start(&messages.pending);
    match step.await {
        Ok(value) => {
            ui.stop(&messages.fulfilled);
            Ok(value)
        }
        Err(e) => {
            ui.fail(&messages.rejected);
            Err(e)
        }
    }
}

/// Log skipped and failed copies from a batch that ran without prompting
pub(crate) fn report_quiet_copies<U: Reporter>(
    ui: &mut U,
    outcomes: &[(TemplateDescriptor, CopyOutcome)],
) -> Result<()> {
    for (template, outcome) in outcomes {
        match outcome {
            CopyOutcome::Copied => {}
            CopyOutcome::Skipped => ui.info(
                &format!("couldn't copy {}, assuming it already exists", template)
                    .dimmed()
                    .to_string(),
            )?,
            CopyOutcome::Failed(reason) => {
                ui.warning(&format!("Failed to copy template {}: {}", template, reason))?
            }
        }
    }
    Ok(())
}
