use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::schedule::ScheduleService;
use crate::models::league::{CreateFixtureRequest, GenerateFixturesRequest};

#[tracing::instrument(name = "Generate league fixtures", skip(pool, request))]
pub async fn generate_fixtures(
    league_id: Uuid,
    request: web::Json<GenerateFixturesRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = ScheduleService::new(pool.get_ref().clone());
    let fixtures = service
        .generate_league_fixtures(league_id, request.start_date, request.fixtures_per_week)
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": fixtures
    })))
}

pub async fn create_fixture(
    league_id: Uuid,
    request: web::Json<CreateFixtureRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = ScheduleService::new(pool.get_ref().clone());
    let fixture = service
        .create_single_fixture(league_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": fixture
    })))
}

pub async fn list_fixtures(
    league_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let service = ScheduleService::new(pool.get_ref().clone());
    let fixtures = service.list_league_fixtures(league_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": fixtures
    })))
}
