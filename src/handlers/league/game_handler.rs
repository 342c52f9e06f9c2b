use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::game_queries;
use crate::errors::ApiError;
use crate::league::results::ResultService;
use crate::models::game::{GameResultRequest, GameStatusRequest, TeamPerformanceRequest};
use crate::services::CacheService;

pub async fn get_game(game_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let game = game_queries::find_game(pool.get_ref(), game_id)
        .await?
        .ok_or(ApiError::NotFound("game"))?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": game
    })))
}

#[tracing::instrument(name = "Update game result", skip(pool, cache, request))]
pub async fn update_game_result(
    game_id: Uuid,
    request: web::Json<GameResultRequest>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = ResultService::new(pool.get_ref().clone(), cache.get_ref().clone());
    service
        .update_game_result(
            game_id,
            request.home_goals,
            request.away_goals,
            request.played_at,
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Result recorded"
    })))
}

#[tracing::instrument(name = "Record team performances", skip(pool, cache, request))]
pub async fn update_team_performances(
    game_id: Uuid,
    request: web::Json<TeamPerformanceRequest>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let service = ResultService::new(pool.get_ref().clone(), cache.get_ref().clone());
    service
        .record_team_performance(game_id, request.is_home_team, request.performances)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Performances recorded"
    })))
}

pub async fn update_game_status(
    game_id: Uuid,
    request: web::Json<GameStatusRequest>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = ResultService::new(pool.get_ref().clone(), cache.get_ref().clone());
    service.mark_game_status(game_id, request.status).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Status updated"
    })))
}

pub async fn delete_game(
    game_id: Uuid,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = ResultService::new(pool.get_ref().clone(), cache.get_ref().clone());
    service.delete_game(game_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Game deleted"
    })))
}
