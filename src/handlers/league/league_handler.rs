use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::league_queries;
use crate::errors::ApiError;
use crate::league::membership::LeagueService;
use crate::models::league::CreateLeagueRequest;
use crate::services::CacheService;

#[tracing::instrument(name = "Create league", skip(pool))]
pub async fn create_league(
    request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("league name cannot be empty".into()));
    }
    let league = league_queries::insert_league(pool.get_ref(), request.name.trim()).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": league
    })))
}

pub async fn list_leagues(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let leagues = league_queries::list_leagues(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": leagues
    })))
}

pub async fn get_league(
    league_id: Uuid,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = LeagueService::new(pool.get_ref().clone(), cache.get_ref().clone());
    let response = service.get_league(league_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": response
    })))
}

pub async fn add_team(
    league_id: Uuid,
    team_id: Uuid,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = LeagueService::new(pool.get_ref().clone(), cache.get_ref().clone());
    service.add_team(league_id, team_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Team added to league"
    })))
}

pub async fn remove_team(
    league_id: Uuid,
    team_id: Uuid,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = LeagueService::new(pool.get_ref().clone(), cache.get_ref().clone());
    service.remove_team(league_id, team_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Team removed from league"
    })))
}
