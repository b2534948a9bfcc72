//! Subprocess seam for package-manager and git invocations

use crate::error::{Result, ScaffoldError};
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Runs external commands to completion
pub trait CommandRunner {
    /// Run `program args..` in `cwd`, failing on a non-zero exit
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> impl Future<Output = Result<()>>;
}

/// Runs commands as real child processes, capturing their output
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        debug!("Running `{} {}` in {}", program, args.join(" "), cwd.display());

        let output = TokioCommand::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ScaffoldError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Command {
                program: program.to_string(),
                args: args.to_vec(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
