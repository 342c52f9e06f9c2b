use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of a game. Transitions move forward only
/// (Scheduled → Played → Completed), except corrective re-entry of a result
/// or a side's performances. Postponed and Cancelled are terminal and only
/// reachable from Scheduled.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Postponed,
    Cancelled,
    Played,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::Postponed => "postponed",
            GameStatus::Cancelled => "cancelled",
            GameStatus::Played => "played",
            GameStatus::Completed => "completed",
        }
    }

    /// A result exists iff the game has been played or completed.
    pub fn has_result(&self) -> bool {
        matches!(self, GameStatus::Played | GameStatus::Completed)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Game {
    pub id: Uuid,
    pub fixture_id: Uuid,
    pub league_id: Uuid,
    pub season: i32,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub status: GameStatus,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub played_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recorded per-player performance for one side of a completed game.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct GamePerformance {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub is_home: bool,
    pub rating: f64,
    pub goals: i32,
    pub assists: i32,
    pub player_of_the_match: bool,
    pub clean_sheet: bool,
    pub position: String,
}

// Request DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GameResultRequest {
    pub home_goals: i32,
    pub away_goals: i32,
    pub played_at: DateTime<Utc>,
}

/// Performance as submitted by the client. The clean-sheet flag is derived
/// server-side from the opponent's goals, never taken from input.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PerformanceInput {
    pub player_id: Uuid,
    pub rating: f64,
    pub goals: i32,
    pub assists: i32,
    pub player_of_the_match: bool,
    pub position: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GameStatusRequest {
    pub status: GameStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamPerformanceRequest {
    pub is_home_team: bool,
    pub performances: Vec<PerformanceInput>,
}
