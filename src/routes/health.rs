use actix_web::{get, HttpResponse};

use crate::handlers::health::health_check;

#[get("/health")]
async fn health() -> HttpResponse {
    health_check().await
}
