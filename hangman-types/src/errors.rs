use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a chat has no session to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotFoundReason {
    /// No game was ever started in this chat.
    NeverStarted,
    /// A game existed but reached a terminal state or was ended.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("guess must be exactly one letter, got {input:?}")]
    InvalidInput { input: String },
    #[error("letter {letter} was already guessed")]
    DuplicateGuess { letter: char },
    #[error("no session for this chat ({reason:?})")]
    SessionNotFound { reason: NotFoundReason },
    #[error("game is already completed")]
    GameAlreadyCompleted,
    #[error("invalid dictionary: {reason}")]
    InvalidDictionary { reason: String },
}
