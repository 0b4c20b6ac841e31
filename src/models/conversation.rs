//! Dialog state types. They are serde-enabled so a [`SessionStore`] backed by an
//! external store can persist them.
//!
//! [`SessionStore`]: crate::services::SessionStore
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a chat session (the Telegram chat id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dialog step a session is currently in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Idle,
    AwaitingGenre,
    AwaitingContentType,
}

/// Per-session dialog state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub step: Step,
    /// Lower-cased genre picked in the genre step, cleared after one recommendation
    pub chosen_genre: Option<String>,
}

impl ConversationState {
    pub fn awaiting_genre() -> Self {
        Self {
            step: Step::AwaitingGenre,
            chosen_genre: None,
        }
    }

    pub fn awaiting_content_type(chosen_genre: Option<String>) -> Self {
        Self {
            step: Step::AwaitingContentType,
            chosen_genre,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.step == Step::Idle && self.chosen_genre.is_none()
    }
}
