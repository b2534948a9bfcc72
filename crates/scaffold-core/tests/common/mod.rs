//! Scripted collaborators and fixtures shared by the integration tests

#![allow(dead_code)]

use scaffold_core::{CommandRunner, Prompter, Reporter, Result, ScaffoldError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One scripted reply to a prompt
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Text(String),
    Select(usize),
    Multi(Vec<usize>),
    Cancel,
}

/// Replays answers in order and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedUi {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub events: Vec<String>,
}

impl ScriptedUi {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn has_event(&self, needle: &str) -> bool {
        self.events.iter().any(|e| e.contains(needle))
    }

    fn next(&mut self, message: &str) -> Answer {
        self.prompts.push(message.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", message))
    }
}

impl Prompter for ScriptedUi {
    fn confirm(&mut self, message: &str, _initial: bool) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(value) => Ok(value),
            Answer::Cancel => Err(ScaffoldError::Cancelled),
            other => panic!("expected confirm for {:?}, got {:?}", message, other),
        }
    }

    fn text(&mut self, message: &str, _placeholder: &str) -> Result<String> {
        match self.next(message) {
            Answer::Text(value) => Ok(value),
            Answer::Cancel => Err(ScaffoldError::Cancelled),
            other => panic!("expected text for {:?}, got {:?}", message, other),
        }
    }

    fn select<T: Clone + Eq>(
        &mut self,
        message: &str,
        items: &[(T, String)],
        _initial: Option<T>,
    ) -> Result<T> {
        match self.next(message) {
            Answer::Select(idx) => Ok(items[idx].0.clone()),
            Answer::Cancel => Err(ScaffoldError::Cancelled),
            other => panic!("expected select for {:?}, got {:?}", message, other),
        }
    }

    fn multiselect<T: Clone + Eq>(
        &mut self,
        message: &str,
        items: &[(T, String)],
    ) -> Result<Vec<T>> {
        match self.next(message) {
            Answer::Multi(idxs) => Ok(idxs.iter().map(|i| items[*i].0.clone()).collect()),
            Answer::Cancel => Err(ScaffoldError::Cancelled),
            other => panic!("expected multiselect for {:?}, got {:?}", message, other),
        }
    }
}

impl Reporter for ScriptedUi {
    fn intro(&mut self, title: &str) -> Result<()> {
        self.events.push(format!("intro: {}", title));
        Ok(())
    }

    fn outro(&mut self, message: &str) -> Result<()> {
        self.events.push(format!("outro: {}", message));
        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<()> {
        self.events.push(format!("info: {}", message));
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        self.events.push(format!("warning: {}", message));
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.events.push(format!("error: {}", message));
        Ok(())
    }

    fn success(&mut self, message: &str) -> Result<()> {
        self.events.push(format!("success: {}", message));
        Ok(())
    }

    fn start(&mut self, message: &str) {
        self.events.push(format!("start: {}", message));
    }

    fn stop(&mut self, message: &str) {
        self.events.push(format!("stop: {}", message));
    }

    fn fail(&mut self, message: &str) {
        self.events.push(format!("fail: {}", message));
    }
}

/// Records invocations instead of spawning processes. `<pm> init` writes the
/// manifest a real manager would generate.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation whose rendered command line starts with `prefix`
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        let line = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(line.clone());

        if self.fail_on.as_deref().is_some_and(|p| line.starts_with(p)) {
            return Err(ScaffoldError::Command {
                program: program.to_string(),
                args: args.to_vec(),
                code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }

        if program != "git" && args.first().map(String::as_str) == Some("init") {
            fs::write(
                cwd.join("package.json"),
                r#"{ "name": "demo", "version": "1.0.0", "main": "index.js", "license": "MIT" }"#,
            )
            .unwrap();
            if program == "bun" {
                fs::write(cwd.join("index.ts"), "console.log(\"hi\");\n").unwrap();
            }
        }
        Ok(())
    }
}

pub const VITEST_TEMPLATE: &str = "import { defineConfig } from \"vitest/config\";\n\nexport default defineConfig({\n  test: {\n    /* react:start\n    environment: \"jsdom\",\n    react:end */\n    globals: false,\n  },\n});\n";

/// A template tree with two generic templates and yarn/bun specific ones
pub fn template_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("base/.husky")).unwrap();
    fs::write(root.join("base/vitest.config.ts"), VITEST_TEMPLATE).unwrap();
    fs::write(root.join("base/.husky/pre-commit"), "npx lint-staged\n").unwrap();
    fs::create_dir_all(root.join("package-managers/yarn")).unwrap();
    fs::write(
        root.join("package-managers/yarn/.yarnrc.yml"),
        "nodeLinker: node-modules\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("package-managers/bun")).unwrap();
    fs::write(root.join("package-managers/bun/bunfig.toml"), "[install]\n").unwrap();
    dir
}

/// A project directory holding `manifest` as its package.json
pub fn project_with(manifest: &serde_json::Value) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        serde_json::to_string_pretty(manifest).unwrap(),
    )
    .unwrap();
    dir
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
