//! The example wizard: choice → text → number → summary.
//!
//! Each step is a variant of [`WizardStep`] carrying the answers collected so far, so the whole
//! dialog position serializes into conversation state.

use serde::{Deserialize, Serialize};

use super::prompts::{recognize_choice, recognize_number, recognize_text, render_choices};
use crate::state::ExampleAnswers;

/// Id of the wizard dialog.
pub const EXAMPLE_WATERFALL_DIALOG: &str = "exampleWaterfallDialog";

const CHOICES: &[&str] = &["Yes", "No"];

/// Current step plus the answers gathered before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum WizardStep {
    Choice,
    Text { choice: String },
    Number { choice: String, text: String },
}

/// Result of feeding one user input to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Next(WizardStep),
    /// Input not recognized; ask again.
    Retry,
    Complete(ExampleAnswers),
}

impl WizardStep {
    pub fn first() -> Self {
        WizardStep::Choice
    }

    pub fn prompt(&self) -> String {
        match self {
            WizardStep::Choice => render_choices("Make a choice.", CHOICES),
            WizardStep::Text { .. } => "This is a prompt".to_string(),
            WizardStep::Number { .. } => "Please enter a number.".to_string(),
        }
    }

    pub fn retry_prompt(&self) -> String {
        match self {
            WizardStep::Choice => render_choices("Try making a choice again.", CHOICES),
            WizardStep::Text { .. } => "Please try again".to_string(),
            WizardStep::Number { .. } => "Please enter a whole number.".to_string(),
        }
    }

    pub fn advance(&self, input: &str) -> StepOutcome {
        match self {
            WizardStep::Choice => match recognize_choice(input, CHOICES) {
                Some(choice) => StepOutcome::Next(WizardStep::Text { choice }),
                None => StepOutcome::Retry,
            },
            WizardStep::Text { choice } => match recognize_text(input) {
                Some(text) => StepOutcome::Next(WizardStep::Number {
                    choice: choice.clone(),
                    text,
                }),
                None => StepOutcome::Retry,
            },
            WizardStep::Number { choice, text } => match recognize_number(input) {
                Some(number) => StepOutcome::Complete(ExampleAnswers {
                    choice: choice.clone(),
                    text: text.clone(),
                    number,
                }),
                None => StepOutcome::Retry,
            },
        }
    }
}

/// Final message once all answers are in.
pub fn summary(answers: &ExampleAnswers) -> String {
    format!(
        "Thanks! You chose {}, wrote \"{}\" and entered {}.",
        answers.choice, answers.text, answers.number
    )
}
