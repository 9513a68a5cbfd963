use anyhow::Result;
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

/// Source of interactive answers. `Ok(None)` means the user cancelled the prompt.
pub trait Prompter {
    fn text(&mut self, message: &str) -> Result<Option<String>>;

    /// Like [`Prompter::text`], but the input is not echoed.
    fn secret(&mut self, message: &str) -> Result<Option<String>>;
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&mut self, message: &str) -> Result<Option<String>> {
        cancelled_as_none(Text::new(message).prompt())
    }

    fn secret(&mut self, message: &str) -> Result<Option<String>> {
        cancelled_as_none(
            Password::new(message)
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked)
                .prompt(),
        )
    }
}

fn cancelled_as_none(answer: std::result::Result<String, InquireError>) -> Result<Option<String>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
