use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;

use crate::entities::{prelude::*, players};
use crate::ledger::{PersistenceError, ScoreLedger, rank_entries};
use hangman_types::{LeaderboardEntry, PlayerId, PlayerRecord};

/// Score ledger backed by the `players` table.
pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: players::Model) -> PlayerRecord {
        PlayerRecord {
            player_id: model.user_id,
            display_name: model.username,
            games_played: model.games_played,
            games_won: model.games_won,
            total_score: model.total_score,
            last_played: model.last_played.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl ScoreLedger for PlayerRepository {
    async fn record_result(
        &self,
        player_id: PlayerId,
        display_name: &str,
        won: bool,
        score: i32,
    ) -> Result<PlayerRecord, PersistenceError> {
        let won_increment = if won { 1 } else { 0 };
        let row = players::ActiveModel {
            user_id: ActiveValue::Set(player_id),
            username: ActiveValue::Set(display_name.to_string()),
            games_played: ActiveValue::Set(1),
            games_won: ActiveValue::Set(won_increment),
            total_score: ActiveValue::Set(score),
            last_played: ActiveValue::Set(Utc::now().into()),
        };

        // Single-statement upsert so concurrent completions cannot lose updates
        let upsert = OnConflict::column(players::Column::UserId)
            .update_columns([players::Column::Username, players::Column::LastPlayed])
            .value(
                players::Column::GamesPlayed,
                Expr::col(players::Column::GamesPlayed).add(1),
            )
            .value(
                players::Column::GamesWon,
                Expr::col(players::Column::GamesWon).add(won_increment),
            )
            .value(
                players::Column::TotalScore,
                Expr::col(players::Column::TotalScore).add(score),
            )
            .to_owned();

        let txn = self.db.begin().await?;
        Players::insert(row)
            .on_conflict(upsert)
            .exec_without_returning(&txn)
            .await?;

        let model = Players::find_by_id(player_id)
            .one(&txn)
            .await?
            .ok_or(PersistenceError::MissingRecord(player_id))?;
        txn.commit().await?;

        debug!(
            "Recorded result for player {}: played={}, won={}, score={}",
            player_id, model.games_played, model.games_won, model.total_score
        );
        Ok(Self::model_to_record(model))
    }

    async fn get_stats(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, PersistenceError> {
        let model = Players::find_by_id(player_id).one(&self.db).await?;
        Ok(model.map(Self::model_to_record))
    }

    async fn get_top_players(&self, limit: u64) -> Result<Vec<LeaderboardEntry>, PersistenceError> {
        let models = Players::find()
            .order_by_desc(players::Column::TotalScore)
            .order_by_asc(players::Column::UserId)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rank_entries(
            models.into_iter().map(Self::model_to_record).collect(),
        ))
    }
}
