use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use hangman_types::{ChatId, InboundMessage, MessageFormat, OutgoingMessage};

pub mod telegram;

pub use telegram::TelegramClient;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The chat service refused the formatted text (bad markup or glyphs).
    #[error("message could not be rendered: {description}")]
    Render { description: String },
    #[error("chat API error {code}: {description}")]
    Api { code: i64, description: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One inbound update: the offset to acknowledge and, for text messages,
/// the message itself.
#[derive(Debug, Clone)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<InboundMessage>,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Updates at or after `offset`, waiting up to the transport's poll
    /// timeout for new ones.
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError>;

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError>;
}

/// Send a reply, falling back to its plain rendering when the rich one is
/// refused.
pub async fn deliver(
    transport: &dyn ChatTransport,
    chat_id: ChatId,
    message: &OutgoingMessage,
) -> Result<(), TransportError> {
    match transport
        .send_text(chat_id, &message.text, message.format)
        .await
    {
        Err(TransportError::Render { description }) => {
            warn!(
                "Chat {} rejected formatted reply ({}), sending plain text",
                chat_id, description
            );
            transport
                .send_text(chat_id, &message.plain_text, MessageFormat::Plain)
                .await
        }
        other => other,
    }
}
