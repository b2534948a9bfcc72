//! `add-entrypoints`: add named entry points, then offer to add more

use crate::config::Settings;
use crate::entry_points::{self, split_names};
use crate::error::ScaffoldError;
use crate::prompt::{Prompter, Reporter};
use anyhow::Result;
use std::path::Path;

pub async fn add_entrypoints<U>(settings: &Settings, names: &[String], ui: &mut U) -> Result<()>
where
    U: Prompter + Reporter,
{
    ui.intro("Add entry points")?;
    let root = &settings.project_root;

    let mut failed = 0;
    if names.is_empty() {
        failed += prompt_entry_points(root, ui, true).await?;
    } else {
        failed += add_each(root, names, ui).await?;
        failed += prompt_entry_points(root, ui, false).await?;
    }

    if failed > 0 {
        anyhow::bail!("{} entry point(s) could not be added", failed);
    }
    ui.outro("All done!")?;
    Ok(())
}

/// Ask for more entry points until the user declines. With `proceed` set the
/// first confirmation is skipped. Returns how many names were rejected.
pub async fn prompt_entry_points<U>(root: &Path, ui: &mut U, mut proceed: bool) -> Result<usize>
where
    U: Prompter + Reporter,
{
    let mut failed = 0;
    loop {
        if !proceed {
            proceed = ui.confirm("Do you want to add any more entry points?", false)?;
        }
        if !proceed {
            return Ok(failed);
        }

        let input = ui.text("What are the entry point names?", "utils react")?;
        let names = split_names(&input);
        failed += add_each(root, &names, ui).await?;
        proceed = false;
    }
}

/// Add names one at a time, each behind its own spinner. A rejected name is
/// reported and skipped; anything wrong with the manifest itself aborts.
async fn add_each<U: Reporter>(root: &Path, names: &[String], ui: &mut U) -> Result<usize> {
    let mut failed = 0;
    for name in names {
        ui.start(&format!("Adding entry point: {}", name));
        match entry_points::add_entry_point(root, name).await {
            Ok(_) => ui.stop(&format!("Added entry point: {}", name)),
            Err(e @ ScaffoldError::InvalidEntryPoint { .. }) => {
                ui.fail(&format!("Failed to add entry point: {}", name));
                ui.error(&e.to_string())?;
                failed += 1;
            }
            Err(e) => {
                ui.fail(&format!("Failed to add entry point: {}", name));
                return Err(e.into());
            }
        }
    }
    Ok(failed)
}
