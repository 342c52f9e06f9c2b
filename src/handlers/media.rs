use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::services::StorageService;

/// Stream a stored image back to the client.
pub async fn serve_image(
    path: web::Path<String>,
    storage: web::Data<StorageService>,
) -> Result<HttpResponse, ApiError> {
    let object_key = path.into_inner();
    let (data, content_type) = storage.download_image(&object_key).await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(data))
}
