//! Interactive confirmation for destructive actions on contexts that carry the
//! warning flag.

use crate::config::ContextRecord;
use crate::error::CliError;
use dialoguer::Confirm;

/// Asks the operator a yes/no question
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, CliError>;
}

/// Terminal prompt; an empty answer counts as yes.
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, CliError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| CliError::Usage(format!("Failed to get user input: {}", e)))
    }
}

/// Fixed answer, for non-interactive use and tests
pub struct StaticConfirmer(pub bool);

impl Confirmer for StaticConfirmer {
    fn confirm(&self, _prompt: &str) -> Result<bool, CliError> {
        Ok(self.0)
    }
}

/// Require confirmation when `record` carries the warning flag.
pub fn confirm_destructive(
    record: &ContextRecord,
    action: &str,
    confirmer: &dyn Confirmer,
) -> Result<(), CliError> {
    if !record.warning {
        return Ok(());
    }
    tracing::warn!(context = %record.name, "Context mandates a warning for this action");
    let prompt = format!(
        "You are working on context \"{}\". {} can be fatal. Continue?",
        record.name, action
    );
    if confirmer.confirm(&prompt)? {
        Ok(())
    } else {
        Err(CliError::NoConfirmation)
    }
}
