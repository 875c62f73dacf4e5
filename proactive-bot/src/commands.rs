//! Text commands recognized in an inbound message.

/// Saves the current conversation as the receiving conversation.
pub const REGISTER_COMMAND: &str = "1";
/// Prefix: the rest of the text is sent as a message (dialog variant).
pub const SEND_PREFIX: char = '2';
/// Prefix: starts the wizard in the receiving conversation (dialog variant).
pub const DIALOG_PREFIX: char = '3';

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register,
    SendText(String),
    StartDialog,
    Unrecognized,
}

impl Command {
    /// Parses `text` for the dialog variant (`with_dialog`) or the single-flow variant.
    ///
    /// In single flow every text other than `1` is forwarded as-is. Nothing to send
    /// (a bare `2`, or blank text) is unrecognized.
    pub fn parse(text: &str, with_dialog: bool) -> Self {
        if text.trim() == REGISTER_COMMAND {
            return Command::Register;
        }

        if !with_dialog {
            return Self::send(text);
        }

        if let Some(rest) = text.strip_prefix(SEND_PREFIX) {
            Self::send(rest)
        } else if text.starts_with(DIALOG_PREFIX) {
            Command::StartDialog
        } else {
            Command::Unrecognized
        }
    }

    fn send(text: &str) -> Self {
        if text.trim().is_empty() {
            Command::Unrecognized
        } else {
            Command::SendText(text.to_string())
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Register => "register",
            Command::SendText(_) => "send_text",
            Command::StartDialog => "start_dialog",
            Command::Unrecognized => "unrecognized",
        }
    }
}
