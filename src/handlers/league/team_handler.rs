use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{stats_queries, team_queries};
use crate::errors::ApiError;
use crate::models::team::{CreateTeamRequest, TeamResponse};
use crate::services::StorageService;

pub async fn create_team(
    request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("team name cannot be empty".into()));
    }
    let team = team_queries::insert_team(pool.get_ref(), request.name.trim()).await?;
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": team
    })))
}

/// Team with its current season record and archived history.
pub async fn get_team(team_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let team = team_queries::find_team(pool.get_ref(), team_id)
        .await?
        .ok_or(ApiError::NotFound("team"))?;
    let current_stats = stats_queries::current_team_stats(pool.get_ref(), team_id).await?;
    let history = stats_queries::team_stats_history(pool.get_ref(), team_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": TeamResponse { team, current_stats, history }
    })))
}

#[tracing::instrument(name = "Upload team image", skip(pool, storage, payload, req))]
pub async fn upload_team_image(
    team_id: Uuid,
    payload: web::Bytes,
    req: HttpRequest,
    pool: web::Data<PgPool>,
    storage: web::Data<StorageService>,
) -> Result<HttpResponse, ApiError> {
    team_queries::find_team(pool.get_ref(), team_id)
        .await?
        .ok_or(ApiError::NotFound("team"))?;

    let content_type = image_content_type(&req)?;
    let file_name = format!("{}.{}", Uuid::new_v4(), image_extension(&content_type));
    let key = storage
        .upload_image("teams", team_id, &file_name, &content_type, payload.to_vec())
        .await?;
    let url = storage.image_url(&key);
    team_queries::set_team_image(pool.get_ref(), team_id, &url).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "image_url": url }
    })))
}

pub(super) fn image_content_type(req: &HttpRequest) -> Result<String, ApiError> {
    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.starts_with("image/") {
        return Err(ApiError::Validation("expected an image content type".into()));
    }
    Ok(content_type)
}

pub(super) fn image_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "img",
    }
}
