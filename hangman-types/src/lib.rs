pub mod errors;
pub mod game;
pub mod messages;
pub mod player;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use player::*;

/// Telegram-style chat identifier; one live session per chat.
pub type ChatId = i64;
/// Identifier of the user who owns a session and its ledger record.
pub type PlayerId = i64;
