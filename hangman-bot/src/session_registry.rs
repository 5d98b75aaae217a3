use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use hangman_core::{GameSession, WordDictionary};
use hangman_types::{ChatId, NotFoundReason, PlayerId};

#[derive(Debug, Default)]
struct ChatSlot {
    session: Option<GameSession>,
    started_before: bool,
}

impl ChatSlot {
    fn missing_reason(&self) -> NotFoundReason {
        if self.started_before {
            NotFoundReason::Ended
        } else {
            NotFoundReason::NeverStarted
        }
    }
}

/// Result of looking up a chat's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Found(GameSession),
    NotFound(NotFoundReason),
}

/// Exclusive access to one chat's slot. Everything done through a guard is
/// linearized with every other operation on the same chat.
pub struct ChatSessionGuard {
    chat_id: ChatId,
    slot: OwnedMutexGuard<ChatSlot>,
}

impl ChatSessionGuard {
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Install `session`, silently replacing any game the chat had.
    pub fn start(&mut self, session: GameSession) -> &GameSession {
        if let Some(previous) = &self.slot.session {
            info!(
                "Chat {} discarded unfinished game of {} to start a new one",
                self.chat_id,
                previous.owner_name()
            );
        }
        self.slot.started_before = true;
        self.slot.session.insert(session)
    }

    pub fn lookup(&self) -> SessionLookup {
        match &self.slot.session {
            Some(session) => SessionLookup::Found(session.clone()),
            None => SessionLookup::NotFound(self.slot.missing_reason()),
        }
    }

    pub fn session_mut(&mut self) -> Result<&mut GameSession, NotFoundReason> {
        let reason = self.slot.missing_reason();
        self.slot.session.as_mut().ok_or(reason)
    }

    /// Remove the session. No-op when nothing is active.
    pub fn end(&mut self) {
        self.slot.session = None;
    }
}

/// Live sessions keyed by chat, with one lock per chat.
pub struct SessionRegistry {
    chats: DashMap<ChatId, Arc<Mutex<ChatSlot>>>,
    dictionary: Arc<WordDictionary>,
}

impl SessionRegistry {
    pub fn new(dictionary: Arc<WordDictionary>) -> Self {
        Self {
            chats: DashMap::new(),
            dictionary,
        }
    }

    /// Registry drawing words from the built-in dictionary.
    pub fn with_builtin_words() -> Self {
        Self::new(Arc::new(WordDictionary::builtin().clone()))
    }

    pub fn dictionary(&self) -> &WordDictionary {
        &self.dictionary
    }

    /// Wait for exclusive access to a chat.
    pub async fn lock(&self, chat_id: ChatId) -> ChatSessionGuard {
        let slot = self
            .chats
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(ChatSlot::default())))
            .clone();

        ChatSessionGuard {
            chat_id,
            slot: slot.lock_owned().await,
        }
    }

    /// Start a game with a random word; always succeeds and overwrites.
    pub async fn start_session(
        &self,
        chat_id: ChatId,
        owner_id: PlayerId,
        owner_name: &str,
    ) -> GameSession {
        let mut guard = self.lock(chat_id).await;
        self.start_in(&mut guard, owner_id, owner_name).clone()
    }

    /// Start a game inside an already held guard.
    pub fn start_in<'a>(
        &self,
        guard: &'a mut ChatSessionGuard,
        owner_id: PlayerId,
        owner_name: &str,
    ) -> &'a GameSession {
        let entry = self.dictionary.pick_random_word().clone();
        info!(
            "Starting game in chat {} for {} ({} letters)",
            guard.chat_id(),
            owner_name,
            entry.word.len()
        );
        guard.start(GameSession::new(entry, owner_id, owner_name))
    }

    pub async fn get_session(&self, chat_id: ChatId) -> SessionLookup {
        self.lock(chat_id).await.lookup()
    }

    pub async fn end_session(&self, chat_id: ChatId) {
        self.lock(chat_id).await.end();
    }

    pub async fn active_session_count(&self) -> usize {
        let slots: Vec<_> = self.chats.iter().map(|entry| entry.value().clone()).collect();

        let mut count = 0;
        for slot in slots {
            if slot.lock().await.session.is_some() {
                count += 1;
            }
        }
        count
    }
}
