//! Conversation turns and the per-request interview session.
//!
//! The server keeps no conversation state. The client resends the full history
//! on every call, and the session is rebuilt from the request body each time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::role::Role;

/// Who spoke a turn. Wire names follow the browser client (`ai` / `user`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "ai", alias = "coach")]
    Coach,
    #[serde(rename = "user", alias = "candidate")]
    Candidate,
}

/// One message in the interview history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    #[serde(rename = "role")]
    pub speaker: Speaker,
    #[serde(rename = "content")]
    pub text: String,
}

impl ConversationTurn {
    pub fn coach(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Coach,
            text: text.into(),
        }
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Candidate,
            text: text.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("conversation history must start with a coach turn")]
    NotStartingWithCoach,

    #[error("conversation history must alternate coach and candidate turns (turn {index} breaks the order)")]
    OutOfOrder { index: usize },

    #[error("conversation history must contain complete exchanges (got {len} turns)")]
    OddLength { len: usize },
}

/// Checks the alternation invariant: coach first, strictly alternating, whole exchanges only.
/// The question index is derived from the history length, so a malformed history would
/// otherwise select a plausible but wrong question.
pub fn validate_history(history: &[ConversationTurn]) -> Result<(), HistoryError> {
    if let Some(first) = history.first() {
        if first.speaker != Speaker::Coach {
            return Err(HistoryError::NotStartingWithCoach);
        }
    }

    for (index, turn) in history.iter().enumerate() {
        let expected = if index % 2 == 0 {
            Speaker::Coach
        } else {
            Speaker::Candidate
        };
        if turn.speaker != expected {
            return Err(HistoryError::OutOfOrder { index });
        }
    }

    if history.len() % 2 != 0 {
        return Err(HistoryError::OddLength { len: history.len() });
    }

    Ok(())
}

/// Everything one interview turn needs, reconstructed from the request.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub resume_text: String,
    pub user_message: String,
    pub history: Vec<ConversationTurn>,
    pub role: Role,
}

impl InterviewSession {
    /// True when the candidate has not answered yet and the coach should open.
    pub fn is_opening(&self) -> bool {
        self.user_message.trim().is_empty()
    }

    /// Number of completed coach/candidate exchanges.
    pub fn question_index(&self) -> usize {
        self.history.len() / 2
    }
}
