use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::seasons::SeasonService;
use crate::services::CacheService;

pub async fn start_new_season(
    league_id: Uuid,
    pool: web::Data<PgPool>,
    cache: web::Data<CacheService>,
) -> Result<HttpResponse, ApiError> {
    let service = SeasonService::new(pool.get_ref().clone(), cache.get_ref().clone());
    let league = service.start_new_season(league_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": league
    })))
}
