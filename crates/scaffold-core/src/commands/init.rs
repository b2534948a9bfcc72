//! `init`: scaffold a new library project in the project root

use super::add_entrypoints::prompt_entry_points;
use super::{report_quiet_copies, with_step};
use crate::config::Settings;
use crate::entry_points;
use crate::manifest::{store, BuildConfig, Manifest, BUILD_CONFIG_KEY};
use crate::package_managers::deps::{self, DEPENDENCIES, DEV_DEPENDENCIES};
use crate::package_managers::{run_lifecycle, CommandRunner, Hook, PackageManager};
use crate::prompt::{Prompter, Reporter, StepMessages};
use crate::templates::{copy_templates, CopyOptions, Overwrite, TemplateCatalog, TemplateDescriptor};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Chosen interactively when `None`
    pub package_manager: Option<PackageManager>,
    /// Entry points added right after the manifest is written
    pub entry_points: Vec<String>,
}

pub async fn init<U, R>(settings: &Settings, args: InitArgs, ui: &mut U, runner: &R) -> Result<()>
where
    U: Prompter + Reporter,
    R: CommandRunner,
{
    ui.intro("Project initialisation")?;
    let root = settings.project_root.as_path();
    let catalog = TemplateCatalog::load(&settings.template_dir)
        .context("Failed to load templates")?;

    let base: Vec<TemplateDescriptor> = catalog.base().cloned().collect();
    copy_quietly(&catalog, &base, root, ui).await?;

    with_step(
        ui,
        StepMessages::new(
            "Initialising git repository",
            "Git repository initialised",
            "Failed to initialise git repository",
        ),
        async {
            runner.run("git", &["init".to_string()], root).await?;
            anyhow::Ok(())
        },
    )
    .await?;

    let pm = match args.package_manager {
        Some(pm) => pm,
        None => {
            let items: Vec<(PackageManager, String)> = PackageManager::ALL
                .iter()
                .map(|pm| (*pm, pm.id().to_string()))
                .collect();
            ui.select("Choose a package manager", &items, Some(PackageManager::Yarn))?
        }
    };
    info!("Using package manager {}", pm);

    let specific: Vec<TemplateDescriptor> = catalog.for_manager(pm).cloned().collect();
    if !specific.is_empty() {
        copy_quietly(&catalog, &specific, root, ui).await?;
    }

    if !pm.lifecycle(Hook::PreInit).is_empty() {
        with_step(
            ui,
            StepMessages::new(
                format!("Setting up {}", pm),
                format!("{} successfully set up", pm),
                format!("Failed to set up {}", pm),
            ),
            async {
                run_lifecycle(pm, Hook::PreInit, root, runner).await?;
                anyhow::Ok(())
            },
        )
        .await?;
    }

    with_step(
        ui,
        StepMessages::new(
            "Initialising package.json",
            "package.json initialised",
            "Failed to initialise package.json",
        ),
        async {
            runner.run(pm.id(), &pm.init_args(), root).await?;
            configure_manifest(root, pm).await
        },
    )
    .await?;

    if !args.entry_points.is_empty() {
        with_step(
            ui,
            StepMessages::new(
                format!("Adding entry points: {}", args.entry_points.join(", ")),
                "Entry points added",
                "Failed to add entry points",
            ),
            async {
                entry_points::add_entry_points(root, &args.entry_points).await?;
                anyhow::Ok(())
            },
        )
        .await?;
    }

    with_step(
        ui,
        StepMessages::new(
            "Installing dependencies",
            "Dependencies installed",
            "Failed to install dependencies",
        ),
        install_dependencies(pm, root, runner),
    )
    .await?;

    if !pm.lifecycle(Hook::PostInit).is_empty() {
        with_step(
            ui,
            StepMessages::new(
                format!("Finishing {} setup", pm),
                format!("{} setup finished", pm),
                format!("Failed to finish {} setup", pm),
            ),
            async {
                run_lifecycle(pm, Hook::PostInit, root, runner).await?;
                anyhow::Ok(())
            },
        )
        .await?;
    }

    let failed = prompt_entry_points(root, ui, false).await?;
    if failed > 0 {
        anyhow::bail!("{} entry point(s) could not be added", failed);
    }

    ui.outro("All set up!")?;
    Ok(())
}

/// Rewrite the manager-generated `package.json` into a dual ESM/CJS library
/// manifest and create `src/index.ts`
pub async fn configure_manifest(root: &Path, pm: PackageManager) -> Result<()> {
    let mut manifest = store::read_manifest(root)
        .await
        .context("Failed to read package.json after init")?;
    apply_library_defaults(&mut manifest, pm);

    store::touch(&root.join("src/index.ts")).await?;
    store::write_manifest(root, &manifest).await?;
    Ok(())
}

fn apply_library_defaults(manifest: &mut Manifest, pm: PackageManager) {
    manifest.remove("main");

    let version = manifest.version().unwrap_or("1.0.0").to_string();
    manifest.set("version", json!(version));
    manifest.set("type", json!("module"));
    manifest.set("main", json!("./dist/index.cjs"));
    manifest.set("module", json!("./dist/index.js"));
    manifest.set("types", json!("./dist/index.d.ts"));
    manifest.set(
        "exports",
        json!({
            "./package.json": "./package.json",
            ".": {
                "import": "./dist/index.js",
                "require": "./dist/index.cjs"
            }
        }),
    );
    manifest.set("files", json!(["dist"]));
    manifest.set(
        "scripts",
        json!({
            "prepare": "husky install",
            "prebuild": pm.run_script("type"),
            "build": "tsup",
            "test": "vitest",
            "lint": "eslint",
            "format": "prettier",
            "pre-commit": "lint-staged",
            "attw": "attw",
            "publint": "publint",
            "type": "tsc",
            "prepack": pm.run_script("publint")
        }),
    );
    manifest.set("prettier", json!({}));
    manifest.set("lint-staged", json!({ "*.{ts,md}": "prettier --write" }));
    manifest.set(BUILD_CONFIG_KEY, BuildConfig::default_config().to_value());
}

async fn install_dependencies<R: CommandRunner>(
    pm: PackageManager,
    root: &Path,
    runner: &R,
) -> Result<()> {
    let dependencies = deps::specifiers(DEPENDENCIES);
    if !dependencies.is_empty() {
        runner
            .run(pm.id(), &pm.install_args(&dependencies, false), root)
            .await?;
    }
    let dev_dependencies = deps::specifiers(DEV_DEPENDENCIES);
    if !dev_dependencies.is_empty() {
        runner
            .run(pm.id(), &pm.install_args(&dev_dependencies, true), root)
            .await?;
    }
    Ok(())
}

/// Copy templates without overwriting anything already in the project
async fn copy_quietly<U>(
    catalog: &TemplateCatalog,
    templates: &[TemplateDescriptor],
    root: &Path,
    ui: &mut U,
) -> Result<()>
where
    U: Prompter + Reporter,
{
    let options = CopyOptions::default().with_overwrite(Overwrite::Never);
    ui.start("Copying templates");
    match copy_templates(catalog, templates, root, &options, ui).await {
        Ok(outcomes) => {
            ui.stop("Templates copied");
            report_quiet_copies(ui, &outcomes)
        }
        Err(e) => {
            ui.fail("Failed to copy templates");
            Err(e.into())
        }
    }
}
