use async_trait::async_trait;
use hangman_types::{LeaderboardEntry, PlayerId, PlayerRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("record for player {0} missing after update")]
    MissingRecord(PlayerId),
}

/// Cumulative per-player statistics. Updates for one player are atomic.
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Upsert: the first call creates the record, later calls accumulate.
    async fn record_result(
        &self,
        player_id: PlayerId,
        display_name: &str,
        won: bool,
        score: i32,
    ) -> Result<PlayerRecord, PersistenceError>;

    async fn get_stats(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, PersistenceError>;

    /// Highest `total_score` first; ties by player id.
    async fn get_top_players(&self, limit: u64) -> Result<Vec<LeaderboardEntry>, PersistenceError>;
}

pub(crate) fn rank_entries(records: Vec<PlayerRecord>) -> Vec<LeaderboardEntry> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, player)| LeaderboardEntry {
            player,
            rank: (index + 1) as u32,
        })
        .collect()
}
