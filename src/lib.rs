use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{http, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub mod config;
pub mod db;
pub mod errors;
mod handlers;
pub mod league;
pub mod models;
mod routes;
pub mod services;
pub mod telemetry;

use crate::routes::init_routes;
use crate::services::{CacheService, StorageService};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    redis_client: Option<Arc<redis::Client>>,
    storage_service: StorageService,
) -> Result<Server, std::io::Error> {
    let db_pool_data = web::Data::new(db_pool);
    let cache_data = web::Data::new(CacheService::new(redis_client));
    let storage_data = web::Data::new(storage_service);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(db_pool_data.clone())
            .app_data(cache_data.clone())
            .app_data(storage_data.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
