use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatTransport, TransportError, Update};
use hangman_types::{ChatId, InboundMessage, MessageFormat};

/// Telegram Bot API client using long polling.
pub struct TelegramClient {
    client: Client,
    endpoint: String,
    poll_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    chat: TelegramChat,
    from: Option<TelegramUser>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TelegramUser {
    id: i64,
    first_name: String,
    last_name: Option<String>,
}

impl TelegramUser {
    fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            poll_timeout,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.endpoint, method)
    }
}

impl From<TelegramUpdate> for Update {
    fn from(update: TelegramUpdate) -> Self {
        let message = update.message.and_then(|message| {
            let text = message.text?;
            let sender = message.from?;
            Some(InboundMessage {
                chat_id: message.chat.id,
                sender_id: sender.id,
                sender_name: sender.full_name(),
                text,
            })
        });

        Update {
            update_id: update.update_id,
            message,
        }
    }
}

/// Map a failed API call onto the transport error taxonomy.
fn classify_error(code: i64, description: String) -> TransportError {
    if code == 400 && description.contains("can't parse") {
        TransportError::Render { description }
    } else {
        TransportError::Api { code, description }
    }
}

fn into_result<T>(response: ApiResponse<T>) -> Result<Option<T>, TransportError> {
    if response.ok {
        Ok(response.result)
    } else {
        Err(classify_error(
            response.error_code.unwrap_or_default(),
            response
                .description
                .unwrap_or_else(|| "no description".to_string()),
        ))
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: ["message"],
        };

        let response: ApiResponse<Vec<TelegramUpdate>> = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(self.poll_timeout + Duration::from_secs(10))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        let updates = into_result(response)?.unwrap_or_default();
        debug!("Fetched {} updates", updates.len());
        Ok(updates.into_iter().map(Update::from).collect())
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: match format {
                MessageFormat::Markdown => Some("Markdown"),
                MessageFormat::Plain => None,
            },
        };

        let response: ApiResponse<serde_json::Value> = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        into_result(response).map(|_| ())
    }
}
