use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::game::Game;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub current_season: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A numbered round of a league season with its scheduling window.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub league_id: Uuid,
    pub season: i32,
    pub round: i32,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureWithGames {
    pub fixture: Fixture,
    pub games: Vec<Game>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateLeagueRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateFixturesRequest {
    pub start_date: DateTime<Utc>,
    pub fixtures_per_week: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GamePairRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateFixtureRequest {
    pub round: i32,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub games: Vec<GamePairRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueResponse {
    pub league: League,
    pub team_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}
