use serde::{Deserialize, Serialize};

use crate::{ChatId, PlayerId};

/// A text message received from the chat transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub sender_id: PlayerId,
    pub sender_name: String,
    pub text: String,
}

impl InboundMessage {
    /// Markdown mention linking to the sender's profile.
    pub fn sender_mention(&self) -> String {
        format!("[{}](tg://user?id={})", self.sender_name, self.sender_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotCommand {
    Start,
    Stats,
    Leaderboard,
    Help,
    Unknown { command: String },
    Guess { text: String },
}

impl BotCommand {
    /// Classify raw message text. Commands start with `/` and may carry a
    /// `@botname` suffix; anything else is a guess attempt.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return BotCommand::Guess {
                text: text.to_string(),
            };
        };

        let word = rest.split_whitespace().next().unwrap_or_default();
        let name = word.split('@').next().unwrap_or_default();

        match name.to_ascii_lowercase().as_str() {
            "start" => BotCommand::Start,
            "stats" => BotCommand::Stats,
            "leaderboard" => BotCommand::Leaderboard,
            "help" => BotCommand::Help,
            _ => BotCommand::Unknown {
                command: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageFormat {
    Markdown,
    Plain,
}

/// A reply ready for delivery. `plain_text` carries the same content with
/// emoji and markup replaced by textual labels, used when the transport
/// rejects `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    pub plain_text: String,
    pub format: MessageFormat,
}

impl OutgoingMessage {
    pub fn markdown(text: impl Into<String>, plain_text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            plain_text: plain_text.into(),
            format: MessageFormat::Markdown,
        }
    }

    pub fn plain(text: impl Into<String>, plain_text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            plain_text: plain_text.into(),
            format: MessageFormat::Plain,
        }
    }

    /// A reply with no glyphs that would need a fallback.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            plain_text: text.clone(),
            text,
            format: MessageFormat::Plain,
        }
    }
}
