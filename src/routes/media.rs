use actix_web::{get, web, HttpResponse, Result};

use crate::errors::ApiError;
use crate::handlers::media;
use crate::services::StorageService;

#[get("/api/images/{object_key:.*}")]
async fn serve_image(
    path: web::Path<String>,
    storage: web::Data<StorageService>,
) -> Result<HttpResponse, ApiError> {
    media::serve_image(path, storage).await
}
