//! Package-manager registry, lifecycle hooks and subprocess execution
//!
//! This module provides:
//! - The static registry of supported managers and their commands
//! - Declarative pre-init / post-init lifecycle steps and their executor
//! - The dependency lists installed by `init`
//! - The `CommandRunner` seam used for every subprocess

pub mod deps;
pub mod registry;
pub mod runner;

pub use registry::{Hook, LifecycleStep, PackageManager, Profile, Subcommand};
pub use runner::{CommandRunner, ProcessRunner};

use crate::error::{Result, ScaffoldError};
use crate::manifest::store;
use std::io;
use std::path::Path;
use tracing::debug;

/// Execute a manager's lifecycle hook in `root`; managers without one do nothing
pub async fn run_lifecycle<R: CommandRunner>(
    pm: PackageManager,
    hook: Hook,
    root: &Path,
    runner: &R,
) -> Result<()> {
    for step in pm.lifecycle(hook) {
        debug!("{} {:?}: {:?}", pm, hook, step);
        match step {
            LifecycleStep::Touch(path) => store::touch(&root.join(path)).await?,
            LifecycleStep::Run(args) => {
                let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
                runner.run(pm.id(), &args, root).await?;
            }
            LifecycleStep::Remove(path) => {
                let path = root.join(path);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(ScaffoldError::io(path, e)),
                }
            }
        }
    }
    Ok(())
}
