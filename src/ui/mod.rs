//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Yes/no prompts behind the [Prompt] trait

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;

use console::style;

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_usage, display_version_change,
    display_warning, usage_text,
};

/// Source of yes/no answers for destructive operations.
pub trait Prompt {
    /// Ask `question`; only an explicit yes counts as confirmation.
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Prompts on the controlling terminal.
///
/// When stdin is not a terminal nothing is read and every question is
/// answered "no", so scripted runs cannot hang or confirm by accident.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            tracing::debug!(question, "stdin is not a terminal, declining");
            eprintln!(
                "{} {} (no terminal, answering no)",
                style("?").cyan(),
                question
            );
            return Ok(false);
        }

        confirm_action(question, &mut stdin.lock(), &mut io::stdout())
    }
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive). Enter, end of input and anything
/// else is a "no".
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
/// * `input` - Where the answer is read from
/// * `output` - Where the question is written
pub fn confirm_action<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "\n{} (y/N): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompt that replays a fixed list of answers; runs out as "no".
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedPrompt {
            answers: Mutex::new(answers.into_iter().collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.questions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(question.to_string());

        Ok(self
            .answers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> bool {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        confirm_action("Delete tag v1.2.3?", &mut input, &mut output).unwrap()
    }

    #[test]
    fn test_confirm_action_accepts_yes() {
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
        assert!(ask("  Yes  \n"));
    }

    #[test]
    fn test_confirm_action_defaults_to_no() {
        assert!(!ask("\n"));
        assert!(!ask("n\n"));
        assert!(!ask("yep\n"));
    }

    #[test]
    fn test_confirm_action_end_of_input_is_no() {
        assert!(!ask(""));
    }

    #[test]
    fn test_confirm_action_writes_question() {
        let mut input = "n\n".as_bytes();
        let mut output = Vec::new();
        confirm_action("Proceed?", &mut input, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "\nProceed? (y/N): ");
    }

    #[test]
    fn test_scripted_prompt_runs_out_as_no() {
        let prompt = ScriptedPrompt::new([true]);
        assert!(prompt.confirm("first?").unwrap());
        assert!(!prompt.confirm("second?").unwrap());
        assert_eq!(prompt.questions(), vec!["first?", "second?"]);
    }
}
