use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-season aggregate record for a player. Exactly one row per player has
/// `is_current = true`; archived rows are never mutated.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerSeasonStats {
    pub id: Uuid,
    pub player_id: Uuid,
    pub league_id: Option<Uuid>,
    pub season: i32,
    pub is_current: bool,
    pub games: i32,
    pub goals: i32,
    pub assists: i32,
    pub clean_sheets: i32,
    pub player_of_the_match: i32,
    pub avg_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-season aggregate record for a team. `wins + losses + draws` equals the
/// number of completed games for that team in that season.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct TeamSeasonStats {
    pub id: Uuid,
    pub team_id: Uuid,
    pub league_id: Option<Uuid>,
    pub season: i32,
    pub is_current: bool,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub goals_scored: i32,
    pub goals_conceded: i32,
    pub clean_sheets: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the computed league table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TableRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub games_played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_scored: i32,
    pub goals_conceded: i32,
    pub goal_difference: i32,
    pub points: i32,
}

/// Current-season team stats joined with the team name, as read for the table.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TeamStatLine {
    pub team_id: Uuid,
    pub team_name: String,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub goals_scored: i32,
    pub goals_conceded: i32,
}

/// Current-season player stats joined with player and team names.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerStatLine {
    pub player_id: Uuid,
    pub player_name: String,
    pub team_name: Option<String>,
    pub games: i32,
    pub goals: i32,
    pub assists: i32,
    pub avg_rating: f64,
}

/// One entry of a player leaderboard (top scorers / assists / avg rating).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LeaderboardEntry {
    pub player_id: Uuid,
    pub player_name: String,
    pub team_name: Option<String>,
    pub games: i32,
    pub value: f64,
    pub per_game: f64,
}
