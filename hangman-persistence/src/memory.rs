use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::ledger::{PersistenceError, ScoreLedger, rank_entries};
use hangman_types::{LeaderboardEntry, PlayerId, PlayerRecord};

/// Non-durable ledger; records live as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    players: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreLedger for InMemoryLedger {
    async fn record_result(
        &self,
        player_id: PlayerId,
        display_name: &str,
        won: bool,
        score: i32,
    ) -> Result<PlayerRecord, PersistenceError> {
        let mut players = self.players.write().await;
        let record = players.entry(player_id).or_insert_with(|| PlayerRecord {
            player_id,
            display_name: display_name.to_string(),
            games_played: 0,
            games_won: 0,
            total_score: 0,
            last_played: Utc::now(),
        });

        record.display_name = display_name.to_string();
        record.games_played += 1;
        record.games_won += if won { 1 } else { 0 };
        record.total_score += score;
        record.last_played = Utc::now();

        Ok(record.clone())
    }

    async fn get_stats(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, PersistenceError> {
        let players = self.players.read().await;
        Ok(players.get(&player_id).cloned())
    }

    async fn get_top_players(&self, limit: u64) -> Result<Vec<LeaderboardEntry>, PersistenceError> {
        let players = self.players.read().await;
        let mut records: Vec<PlayerRecord> = players.values().cloned().collect();
        records.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then(a.player_id.cmp(&b.player_id))
        });
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(rank_entries(records))
    }
}
