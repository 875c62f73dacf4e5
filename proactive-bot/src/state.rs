//! Per-user and per-conversation state used by the bot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storage::{StatePropertyAccessor, StateScope, StateStore};

use crate::dialogs::DialogState;

pub const USER_PROFILE_NAME: &str = "UserProfile";
pub const EXAMPLE_ANSWERS_NAME: &str = "ExampleAnswers";
pub const DIALOG_STATE_NAME: &str = "DialogState";

/// What the wizard learned about the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub age: Option<i64>,
}

/// Answers of the last completed wizard in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleAnswers {
    pub choice: String,
    pub text: String,
    pub number: i64,
}

/// Accessors for every state property, sharing one store.
#[derive(Clone)]
pub struct BotAccessors {
    pub user_profile: StatePropertyAccessor<UserProfile>,
    pub example_answers: StatePropertyAccessor<ExampleAnswers>,
    pub dialog_state: StatePropertyAccessor<DialogState>,
}

impl BotAccessors {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            user_profile: StatePropertyAccessor::new(
                store.clone(),
                StateScope::User,
                USER_PROFILE_NAME,
            ),
            example_answers: StatePropertyAccessor::new(
                store.clone(),
                StateScope::Conversation,
                EXAMPLE_ANSWERS_NAME,
            ),
            dialog_state: StatePropertyAccessor::new(
                store,
                StateScope::Conversation,
                DIALOG_STATE_NAME,
            ),
        }
    }
}
