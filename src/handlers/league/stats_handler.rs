use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::streaks::AdvancedStatsService;
use crate::league::table::{LeaderboardMetric, TableService};
use crate::league::team_of_week::TeamOfWeekService;
use crate::models::league::{LimitQuery, WindowQuery};
use crate::services::CacheService;

pub async fn get_league_table(
    league_id: Uuid,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = TableService::new(pool.get_ref().clone(), cache.get_ref().clone());
    let table = service.get_league_table(league_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": table
    })))
}

pub async fn get_leaderboard(
    league_id: Uuid,
    metric: LeaderboardMetric,
    query: web::Query<LimitQuery>,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = TableService::new(pool.get_ref().clone(), cache.get_ref().clone());
    let ranking = service.get_leaderboard(league_id, metric, query.limit).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": ranking
    })))
}

pub async fn get_team_advanced_stats(
    team_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = AdvancedStatsService::new(pool.get_ref().clone());
    let streaks = service.get_team_advanced_stats(team_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": streaks
    })))
}

#[tracing::instrument(name = "Get team of the week", skip(pool, query))]
pub async fn get_team_of_the_week(
    league_id: Uuid,
    query: web::Query<WindowQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    if query.from >= query.to {
        return Err(ApiError::Validation(
            "window start must precede window end".into(),
        ));
    }
    let service = TeamOfWeekService::new(pool.get_ref().clone());
    let totw = service
        .get_team_of_the_week(league_id, query.from, query.to)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": totw
    })))
}
