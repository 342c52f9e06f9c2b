use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{league_queries, player_queries, stats_queries, team_queries};
use crate::errors::ApiError;
use crate::models::player::{CreatePlayerRequest, PlayerResponse};
use crate::services::StorageService;

use super::team_handler::{image_content_type, image_extension};

pub async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("player name cannot be empty".into()));
    }
    let player = player_queries::insert_player(
        pool.get_ref(),
        request.name.trim(),
        request.preferred_position.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": player
    })))
}

/// Player with current season record and archived history.
pub async fn get_player(
    player_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player = player_queries::find_player(pool.get_ref(), player_id)
        .await?
        .ok_or(ApiError::NotFound("player"))?;
    let current_stats = stats_queries::current_player_stats(pool.get_ref(), player_id).await?;
    let history = stats_queries::player_stats_history(pool.get_ref(), player_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": PlayerResponse { player, current_stats, history }
    })))
}

/// Put a player on a team. If the team plays in a league, a current-season
/// record opens for the player as part of the same transaction.
#[tracing::instrument(name = "Assign player to team", skip(pool))]
pub async fn assign_player_to_team(
    player_id: Uuid,
    team_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player = player_queries::find_player(pool.get_ref(), player_id)
        .await?
        .ok_or(ApiError::NotFound("player"))?;
    let team = team_queries::find_team(pool.get_ref(), team_id)
        .await?
        .ok_or(ApiError::NotFound("team"))?;
    if player.team_id.is_some() {
        return Err(ApiError::Validation(
            "player already belongs to a team".into(),
        ));
    }

    let mut tx = pool.get_ref().begin().await?;
    player_queries::set_player_team(&mut *tx, player_id, Some(team_id)).await?;
    if let Some(league_id) = team.league_id {
        let league = league_queries::find_league(&mut *tx, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        stats_queries::insert_player_stats(&mut *tx, player_id, league_id, league.current_season)
            .await?;
    }
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Player assigned to team"
    })))
}

/// Take a player off their team, archiving any open season record.
pub async fn remove_player_from_team(
    player_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player = player_queries::find_player(pool.get_ref(), player_id)
        .await?
        .ok_or(ApiError::NotFound("player"))?;
    if player.team_id.is_none() {
        return Err(ApiError::Validation("player has no team".into()));
    }

    let mut tx = pool.get_ref().begin().await?;
    player_queries::set_player_team(&mut *tx, player_id, None).await?;
    stats_queries::archive_player_stats(&mut *tx, player_id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Player removed from team"
    })))
}

#[tracing::instrument(name = "Upload player image", skip(pool, storage, payload, req))]
pub async fn upload_player_image(
    player_id: Uuid,
    payload: web::Bytes,
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<StorageService>,
) -> Result<HttpResponse, ApiError> {
    player_queries::find_player(pool.get_ref(), player_id)
        .await?
        .ok_or(ApiError::NotFound("player"))?;

    let content_type = image_content_type(&req)?;
    let file_name = format!("{}.{}", Uuid::new_v4(), image_extension(&content_type));
    let key = storage
        .upload_image("players", player_id, &file_name, &content_type, payload.to_vec())
        .await?;
    let url = storage.image_url(&key);
    player_queries::set_player_image(pool.get_ref(), player_id, &url).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "image_url": url }
    })))
}
