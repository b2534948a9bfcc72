//! Charm-style prompts and progress using cliclack

use crate::error::{Result, ScaffoldError};
use crate::prompt::{Prompter, Reporter};
use std::io;

/// Map a cliclack failure; Esc / Ctrl+C surface as `Interrupted`
fn prompt_error(e: io::Error) -> ScaffoldError {
    if e.kind() == io::ErrorKind::Interrupted {
        ScaffoldError::Cancelled
    } else {
        ScaffoldError::Io {
            path: "<terminal>".into(),
            source: e,
        }
    }
}

/// Terminal UI backed by cliclack
#[derive(Default)]
pub struct ClackUi {
    spinner: Option<cliclack::ProgressBar>,
}

impl ClackUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the cancellation footer shown when the user backs out
    pub fn cancelled() {
        let _ = cliclack::outro_cancel("Cancelled");
    }
}

impl Prompter for ClackUi {
    fn confirm(&mut self, message: &str, initial: bool) -> Result<bool> {
        cliclack::confirm(message)
            .initial_value(initial)
            .interact()
            .map_err(prompt_error)
    }

    fn text(&mut self, message: &str, placeholder: &str) -> Result<String> {
        cliclack::input(message)
            .placeholder(placeholder)
            .interact()
            .map_err(prompt_error)
    }

    fn select<T: Clone + Eq>(
        &mut self,
        message: &str,
        items: &[(T, String)],
        initial: Option<T>,
    ) -> Result<T> {
        let mut select = cliclack::select(message);
        for (value, label) in items {
            select = select.item(value.clone(), label, "");
        }
        if let Some(initial) = initial {
            select = select.initial_value(initial);
        }
        select.interact().map_err(prompt_error)
    }

    fn multiselect<T: Clone + Eq>(
        &mut self,
        message: &str,
        items: &[(T, String)],
    ) -> Result<Vec<T>> {
        let mut multi = cliclack::multiselect(message);
        for (value, label) in items {
            multi = multi.item(value.clone(), label, "");
        }
        multi.required(false).interact().map_err(prompt_error)
    }
}

impl Reporter for ClackUi {
    fn intro(&mut self, title: &str) -> Result<()> {
        cliclack::intro(title).map_err(prompt_error)
    }

    fn outro(&mut self, message: &str) -> Result<()> {
        cliclack::outro(message).map_err(prompt_error)
    }

    fn info(&mut self, message: &str) -> Result<()> {
        cliclack::log::info(message).map_err(prompt_error)
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        cliclack::log::warning(message).map_err(prompt_error)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        cliclack::log::error(message).map_err(prompt_error)
    }

    fn success(&mut self, message: &str) -> Result<()> {
        cliclack::log::success(message).map_err(prompt_error)
    }

    fn start(&mut self, message: &str) {
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.spinner = Some(spinner);
    }

    fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        }
    }

    fn fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        }
    }
}
