use std::sync::Arc;

use tracing::{info, warn};

use crate::replies;
use crate::session_registry::SessionRegistry;
use hangman_persistence::ScoreLedger;
use hangman_types::{
    BotCommand, GameError, GameStatus, InboundMessage, NotFoundReason, OutgoingMessage,
};

/// Turns one inbound chat message into the replies to send back.
#[derive(Clone)]
pub struct MessageHandler {
    registry: Arc<SessionRegistry>,
    ledger: Option<Arc<dyn ScoreLedger>>,
    leaderboard_size: u64,
}

impl MessageHandler {
    /// `ledger` is `None` when score tracking is disabled.
    pub fn new(
        registry: Arc<SessionRegistry>,
        ledger: Option<Arc<dyn ScoreLedger>>,
        leaderboard_size: u64,
    ) -> Self {
        Self {
            registry,
            ledger,
            leaderboard_size,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub async fn handle_message(&self, message: &InboundMessage) -> Vec<OutgoingMessage> {
        match BotCommand::parse(&message.text) {
            BotCommand::Start => self.handle_start(message).await,
            BotCommand::Stats => vec![self.handle_stats(message).await],
            BotCommand::Leaderboard => vec![self.handle_leaderboard().await],
            BotCommand::Help => vec![replies::help()],
            BotCommand::Unknown { command } => {
                info!("Ignoring unknown command /{} in chat {}", command, message.chat_id);
                vec![replies::unknown_command()]
            }
            BotCommand::Guess { text } => self.handle_guess(message, &text).await,
        }
    }

    async fn handle_start(&self, message: &InboundMessage) -> Vec<OutgoingMessage> {
        let mut guard = self.registry.lock(message.chat_id).await;
        let session = self
            .registry
            .start_in(&mut guard, message.sender_id, &message.sender_name);

        vec![
            replies::game_started(message, session),
            replies::game_state(session),
        ]
    }

    async fn handle_guess(&self, message: &InboundMessage, text: &str) -> Vec<OutgoingMessage> {
        let mut guard = self.registry.lock(message.chat_id).await;

        let session = match guard.session_mut() {
            Ok(session) => session,
            Err(NotFoundReason::NeverStarted) => return vec![replies::no_active_game()],
            Err(NotFoundReason::Ended) => return vec![replies::game_already_over()],
        };

        let outcome = match session.apply_guess(text) {
            Ok(outcome) => outcome,
            Err(GameError::InvalidInput { .. }) => return vec![replies::invalid_guess()],
            Err(GameError::DuplicateGuess { .. }) => return vec![replies::duplicate_guess()],
            Err(e) => {
                warn!("Guess rejected in chat {}: {}", message.chat_id, e);
                return vec![replies::game_already_over()];
            }
        };

        let mut responses = vec![replies::guess_feedback(outcome.correct)];
        if outcome.status == GameStatus::InProgress {
            responses.push(replies::game_state(session));
            return responses;
        }

        let won = outcome.status == GameStatus::Won;
        let score = outcome.score.unwrap_or(0);
        let word = session.word().to_string();
        let owner_id = session.owner_id();
        let owner_name = session.owner_name().to_string();

        info!(
            "Game in chat {} finished: {:?}, word {}, score {}",
            message.chat_id, outcome.status, word, score
        );

        // The chat is free again before the ledger is touched.
        guard.end();
        drop(guard);

        if let Some(ledger) = &self.ledger {
            if let Err(e) = ledger.record_result(owner_id, &owner_name, won, score).await {
                warn!("Failed to record result for player {}: {}", owner_id, e);
                responses.push(replies::score_not_saved());
            }
        }

        if won {
            responses.push(replies::game_won(&word, score));
        } else {
            responses.push(replies::game_lost(&word));
        }
        responses
    }

    async fn handle_stats(&self, message: &InboundMessage) -> OutgoingMessage {
        let Some(ledger) = &self.ledger else {
            return replies::stats_disabled();
        };

        match ledger.get_stats(message.sender_id).await {
            Ok(Some(record)) => replies::stats(message, &record),
            Ok(None) => replies::no_stats_yet(),
            Err(e) => {
                warn!("Failed to load stats for {}: {}", message.sender_id, e);
                replies::stats_unavailable()
            }
        }
    }

    async fn handle_leaderboard(&self) -> OutgoingMessage {
        let Some(ledger) = &self.ledger else {
            return replies::stats_disabled();
        };

        match ledger.get_top_players(self.leaderboard_size).await {
            Ok(entries) if entries.is_empty() => replies::empty_leaderboard(),
            Ok(entries) => replies::leaderboard(&entries),
            Err(e) => {
                warn!("Failed to load leaderboard: {}", e);
                replies::leaderboard_unavailable()
            }
        }
    }
}
