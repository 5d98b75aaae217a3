use serde::{Deserialize, Serialize};

/// Number of lives every session starts with.
pub const MAX_LIVES: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String, // uppercase ASCII letters only
    pub hint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Result of applying one accepted guess to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub letter: char,
    pub correct: bool,
    pub status: GameStatus,
    pub lives_remaining: u8,
    /// Points awarded when this guess won the game.
    pub score: Option<i32>,
}
