//! Interactive selection via `dialoguer`.

use dialoguer::Select;

use crate::error::Result;
use crate::workflow::Prompt;

/// Terminal-backed selector.
///
/// Suspends until the user picks one entry with the arrow keys.
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn choose(&self, prompt: &str, options: &[String]) -> Result<String> {
        let index = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()?;

        Ok(options[index].clone())
    }
}
