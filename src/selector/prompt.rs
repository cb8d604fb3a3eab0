//! Interactive selection

use crate::error::{KcError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

/// Asks the user to choose one of several options
pub trait Prompt: Send + Sync {
    /// Present `question` with `options` and return the chosen option.
    /// Blocks until the user answers.
    fn ask(&self, question: &str, options: &[String]) -> Result<String>;
}

impl<P: Prompt + ?Sized> Prompt for &P {
    fn ask(&self, question: &str, options: &[String]) -> Result<String> {
        (**self).ask(question, options)
    }
}

/// Terminal prompt rendered with dialoguer
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn ask(&self, question: &str, options: &[String]) -> Result<String> {
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(0)
            .items(options)
            .interact()?;

        options
            .get(index)
            .cloned()
            .ok_or_else(|| KcError::Prompt(format!("no option at index {}", index)))
    }
}
