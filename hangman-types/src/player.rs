use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub display_name: String,
    pub games_played: i32,
    pub games_won: i32,
    pub total_score: i32,
    pub last_played: DateTime<Utc>,
}

impl PlayerRecord {
    /// Share of games won, as a percentage; 0 when nothing was played.
    pub fn win_percentage(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played) * 100.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: PlayerRecord,
    pub rank: u32,
}
