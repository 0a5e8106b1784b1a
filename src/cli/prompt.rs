//! Terminal implementation of the selection prompt
//!
//! Presents a keyboard-driven multi-select (space toggles, enter confirms)
//! for choosing artifacts when no filter was supplied.

use dialoguer::MultiSelect;

use crate::app::Prompter;
use crate::errors::{PromptError, PromptResult};

/// Prompter backed by an interactive terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn multi_select(&self, message: &str, options: &[String]) -> PromptResult<Vec<usize>> {
        if !atty::is(atty::Stream::Stdin) {
            return Err(PromptError::NotInteractive);
        }

        let chosen = MultiSelect::new()
            .with_prompt(message)
            .items(options)
            .interact()?;
        Ok(chosen)
    }
}
