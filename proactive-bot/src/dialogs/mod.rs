//! Dialog stack for the wizard.
//!
//! [`DialogSet`] knows the registered dialogs and the state accessors; [`DialogContext`] is the
//! per-turn view with `begin_dialog`, `continue_dialog` and `stack`. The stack lives in
//! conversation state and is written back after every change.

mod prompts;
mod waterfall;

use bot_core::{HandlerError, Result, TurnContext};
use serde::{Deserialize, Serialize};
use storage::StatePropertyAccessor;
use tracing::{info, instrument};

use crate::state::{BotAccessors, ExampleAnswers, UserProfile};

pub use prompts::{recognize_choice, recognize_number, recognize_text, render_choices};
pub use waterfall::{summary, StepOutcome, WizardStep, EXAMPLE_WATERFALL_DIALOG};

/// One running dialog on the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogInstance {
    pub id: String,
    pub step: WizardStep,
}

/// Per-conversation dialog stack (top is last).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    pub stack: Vec<DialogInstance>,
}

/// What happened to the dialog during this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogTurnStatus {
    /// No dialog was active.
    Empty,
    /// A prompt was sent; waiting for the user's answer.
    Waiting,
    /// The dialog finished and was popped.
    Complete,
}

/// Registered dialogs plus the state they read and write.
pub struct DialogSet {
    dialog_state: StatePropertyAccessor<DialogState>,
    answers: StatePropertyAccessor<ExampleAnswers>,
    user_profile: StatePropertyAccessor<UserProfile>,
}

impl DialogSet {
    pub fn new(accessors: &BotAccessors) -> Self {
        Self {
            dialog_state: accessors.dialog_state.clone(),
            answers: accessors.example_answers.clone(),
            user_profile: accessors.user_profile.clone(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        name == EXAMPLE_WATERFALL_DIALOG
    }

    /// Loads the conversation's dialog stack for this turn.
    pub async fn create_context<'a>(&'a self, turn: &'a TurnContext) -> Result<DialogContext<'a>> {
        let activity = turn.activity();
        let state = self
            .dialog_state
            .get_or_default(&activity.channel_id, &activity.conversation.id)
            .await?;
        Ok(DialogContext {
            set: self,
            turn,
            state,
        })
    }
}

/// Dialog stack of one conversation, bound to the current turn.
pub struct DialogContext<'a> {
    set: &'a DialogSet,
    turn: &'a TurnContext,
    state: DialogState,
}

impl<'a> DialogContext<'a> {
    pub fn stack(&self) -> &[DialogInstance] {
        &self.state.stack
    }

    pub fn active_dialog(&self) -> Option<&DialogInstance> {
        self.state.stack.last()
    }

    /// Starts `name` and sends its first prompt. A running instance of the same dialog is replaced.
    #[instrument(skip(self))]
    pub async fn begin_dialog(&mut self, name: &str) -> Result<DialogTurnStatus> {
        if !self.set.contains(name) {
            return Err(HandlerError::UnknownDialog(name.to_string()).into());
        }

        self.state.stack.retain(|d| d.id != name);
        let step = WizardStep::first();
        self.turn.send_activity(&step.prompt()).await?;
        self.state.stack.push(DialogInstance {
            id: name.to_string(),
            step,
        });
        self.save().await?;

        info!(
            dialog = %name,
            conversation_id = %self.turn.activity().conversation.id,
            "Dialog started"
        );
        Ok(DialogTurnStatus::Waiting)
    }

    /// Feeds the turn's text to the active step.
    #[instrument(skip(self))]
    pub async fn continue_dialog(&mut self) -> Result<DialogTurnStatus> {
        let Some(active) = self.state.stack.last().cloned() else {
            return Ok(DialogTurnStatus::Empty);
        };
        let input = self
            .turn
            .activity()
            .text()
            .ok_or(HandlerError::NoText)?
            .to_string();

        match active.step.advance(&input) {
            StepOutcome::Retry => {
                self.turn.send_activity(&active.step.retry_prompt()).await?;
                Ok(DialogTurnStatus::Waiting)
            }
            StepOutcome::Next(step) => {
                self.turn.send_activity(&step.prompt()).await?;
                if let Some(top) = self.state.stack.last_mut() {
                    top.step = step;
                }
                self.save().await?;
                Ok(DialogTurnStatus::Waiting)
            }
            StepOutcome::Complete(answers) => {
                self.finish(&answers).await?;
                self.state.stack.pop();
                self.save().await?;
                info!(dialog = %active.id, "Dialog completed");
                Ok(DialogTurnStatus::Complete)
            }
        }
    }

    async fn finish(&self, answers: &ExampleAnswers) -> Result<()> {
        let activity = self.turn.activity();
        self.set
            .answers
            .set(&activity.channel_id, &activity.conversation.id, answers)
            .await?;

        let mut profile = self
            .set
            .user_profile
            .get_or_default(&activity.channel_id, &activity.from.id)
            .await?;
        profile.name = Some(answers.text.clone());
        profile.age = Some(answers.number);
        self.set
            .user_profile
            .set(&activity.channel_id, &activity.from.id, &profile)
            .await?;

        self.turn.send_activity(&summary(answers)).await
    }

    async fn save(&self) -> Result<()> {
        let activity = self.turn.activity();
        self.set
            .dialog_state
            .set(&activity.channel_id, &activity.conversation.id, &self.state)
            .await?;
        Ok(())
    }
}
