//! Interactive collaborators
//!
//! Orchestration never talks to the terminal directly. It asks a `Prompter` for
//! input and tells a `Reporter` about progress, so commands run the same under
//! the cliclack UI and under scripted test doubles.

use crate::error::Result;

/// Asks the user for input. Every method returns `ScaffoldError::Cancelled`
/// when the user backs out of the prompt.
pub trait Prompter {
    fn confirm(&mut self, message: &str, initial: bool) -> Result<bool>;

    fn text(&mut self, message: &str, placeholder: &str) -> Result<String>;

    /// Pick one of `items` (`(value, label)` pairs)
    fn select<T: Clone + Eq>(
        &mut self,
        message: &str,
        items: &[(T, String)],
        initial: Option<T>,
    ) -> Result<T>;

    /// Pick any number of `items`
    fn multiselect<T: Clone + Eq>(&mut self, message: &str, items: &[(T, String)])
        -> Result<Vec<T>>;
}

/// Shows progress and messages to the user
pub trait Reporter {
    fn intro(&mut self, title: &str) -> Result<()>;

    fn outro(&mut self, message: &str) -> Result<()>;

    fn info(&mut self, message: &str) -> Result<()>;

    fn warning(&mut self, message: &str) -> Result<()>;

    fn error(&mut self, message: &str) -> Result<()>;

    fn success(&mut self, message: &str) -> Result<()>;

    /// Start a long-running step
    fn start(&mut self, message: &str);

    /// Finish the current step successfully
    fn stop(&mut self, message: &str);

    /// Finish the current step with a failure
    fn fail(&mut self, message: &str);
}

/// Messages shown while a step runs and when it ends
#[derive(Debug, Clone)]
pub struct StepMessages {
    pub pending: String,
    pub fulfilled: String,
    pub rejected: String,
}

impl StepMessages {
    pub fn new(
        pending: impl Into<String>,
        fulfilled: impl Into<String>,
        rejected: impl Into<String>,
    ) -> Self {
        Self {
            pending: pending.into(),
            fulfilled: fulfilled.into(),
            rejected: rejected.into(),
        }
    }
}
