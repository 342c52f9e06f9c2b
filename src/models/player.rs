use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::stats::PlayerSeasonStats;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Option<Uuid>,
    pub name: String,
    pub image_url: Option<String>,
    pub preferred_position: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display card used when enriching computed lineups with names and images.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerCard {
    pub player_id: Uuid,
    pub player_name: String,
    pub player_image: Option<String>,
    pub team_name: Option<String>,
    pub team_image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub preferred_position: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub player: Player,
    pub current_stats: Option<PlayerSeasonStats>,
    pub history: Vec<PlayerSeasonStats>,
}
