#![allow(dead_code)]

use async_trait::async_trait;
use hangman_bot::handlers::MessageHandler;
use hangman_bot::session_registry::{SessionLookup, SessionRegistry};
use hangman_bot::transport::{ChatTransport, TransportError, Update};
use hangman_core::WordDictionary;
use hangman_persistence::{InMemoryLedger, PersistenceError, ScoreLedger};
use hangman_types::{
    ChatId, InboundMessage, LeaderboardEntry, MessageFormat, OutgoingMessage, PlayerId,
    PlayerRecord, WordEntry,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_WORD: &str = "MINT";
pub const TEST_HINT: &str = "Fresh herb";
pub const TEST_CHAT: ChatId = -1001;

/// Dictionary with a single known word for predictable games.
pub fn create_test_dictionary() -> Arc<WordDictionary> {
    let entries = vec![WordEntry {
        word: TEST_WORD.to_string(),
        hint: TEST_HINT.to_string(),
    }];
    Arc::new(WordDictionary::from_entries(entries).unwrap())
}

pub fn message(chat_id: ChatId, sender_id: PlayerId, name: &str, text: &str) -> InboundMessage {
    InboundMessage {
        chat_id,
        sender_id,
        sender_name: name.to_string(),
        text: text.to_string(),
    }
}

/// Ledger whose every call fails.
pub struct FailingLedger;

#[async_trait]
impl ScoreLedger for FailingLedger {
    async fn record_result(
        &self,
        player_id: PlayerId,
        _display_name: &str,
        _won: bool,
        _score: i32,
    ) -> Result<PlayerRecord, PersistenceError> {
        Err(PersistenceError::MissingRecord(player_id))
    }

    async fn get_stats(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, PersistenceError> {
        Err(PersistenceError::MissingRecord(player_id))
    }

    async fn get_top_players(&self, _limit: u64) -> Result<Vec<LeaderboardEntry>, PersistenceError> {
        Err(PersistenceError::MissingRecord(0))
    }
}

/// Ledger that looks at the chat's session while a result is being saved.
pub struct ObservingLedger {
    registry: Arc<SessionRegistry>,
    chat_id: ChatId,
    seen: Mutex<Vec<SessionLookup>>,
}

impl ObservingLedger {
    pub fn new(registry: Arc<SessionRegistry>, chat_id: ChatId) -> Self {
        Self {
            registry,
            chat_id,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SessionLookup> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoreLedger for ObservingLedger {
    async fn record_result(
        &self,
        player_id: PlayerId,
        display_name: &str,
        won: bool,
        score: i32,
    ) -> Result<PlayerRecord, PersistenceError> {
        let lookup = tokio::time::timeout(
            Duration::from_secs(1),
            self.registry.get_session(self.chat_id),
        )
        .await
        .expect("chat lock is free while saving");
        self.seen.lock().unwrap().push(lookup);

        Ok(PlayerRecord {
            player_id,
            display_name: display_name.to_string(),
            games_played: 1,
            games_won: if won { 1 } else { 0 },
            total_score: score,
            last_played: chrono::Utc::now(),
        })
    }

    async fn get_stats(&self, _player_id: PlayerId) -> Result<Option<PlayerRecord>, PersistenceError> {
        Ok(None)
    }

    async fn get_top_players(&self, _limit: u64) -> Result<Vec<LeaderboardEntry>, PersistenceError> {
        Ok(Vec::new())
    }
}

pub type FetchResult = Result<Vec<Update>, TransportError>;

/// Transport that records sends. With `reject_markdown` set it refuses
/// formatted text the way the chat service refuses unparsable markup.
/// `fetch_updates` plays back the scripted results, then waits forever.
#[derive(Default)]
pub struct RecordingTransport {
    pub reject_markdown: bool,
    pub fail_all: bool,
    sent: Mutex<Vec<(ChatId, String, MessageFormat)>>,
    script: Mutex<VecDeque<FetchResult>>,
    offsets: Mutex<Vec<Option<i64>>>,
}

impl RecordingTransport {
    pub fn rejecting_markdown() -> Self {
        Self {
            reject_markdown: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn scripted(script: Vec<FetchResult>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(ChatId, String, MessageFormat)> {
        self.sent.lock().unwrap().clone()
    }

    /// Offsets passed to each `fetch_updates` call so far.
    pub fn offsets(&self) -> Vec<Option<i64>> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn fetch_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        self.offsets.lock().unwrap().push(offset);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        format: MessageFormat,
    ) -> Result<(), TransportError> {
        if self.fail_all {
            return Err(TransportError::Api {
                code: 403,
                description: "Forbidden: bot was kicked".to_string(),
            });
        }
        if self.reject_markdown && format == MessageFormat::Markdown {
            return Err(TransportError::Render {
                description: "Bad Request: can't parse entities".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id, text.to_string(), format));
        Ok(())
    }
}

pub fn text_update(update_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(message(TEST_CHAT, 42, "Ada", text)),
    }
}

/// Polls until `condition` holds, giving up after a few seconds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..300 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

/// Test setup that provides all necessary components
pub struct TestBotSetup {
    pub registry: Arc<SessionRegistry>,
    pub ledger: Arc<InMemoryLedger>,
    pub handler: MessageHandler,
}

impl TestBotSetup {
    pub fn new() -> Self {
        let registry = Arc::new(SessionRegistry::new(create_test_dictionary()));
        let ledger = Arc::new(InMemoryLedger::new());
        let handler = MessageHandler::new(
            registry.clone(),
            Some(ledger.clone() as Arc<dyn ScoreLedger>),
            10,
        );
        Self {
            registry,
            ledger,
            handler,
        }
    }

    pub fn with_ledger(ledger: Option<Arc<dyn ScoreLedger>>) -> MessageHandler {
        let registry = Arc::new(SessionRegistry::new(create_test_dictionary()));
        MessageHandler::new(registry, ledger, 10)
    }

    pub async fn send(
        &self,
        sender_id: PlayerId,
        name: &str,
        text: &str,
    ) -> Vec<OutgoingMessage> {
        self.handler
            .handle_message(&message(TEST_CHAT, sender_id, name, text))
            .await
    }

    /// Start a game and guess every letter in `letters`, returning the
    /// replies to the last guess.
    pub async fn play(&self, sender_id: PlayerId, name: &str, letters: &str) -> Vec<OutgoingMessage> {
        self.send(sender_id, name, "/start").await;
        let mut last = Vec::new();
        for letter in letters.chars() {
            last = self.send(sender_id, name, &letter.to_string()).await;
        }
        last
    }
}
