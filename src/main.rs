use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use matchday_backend::config::settings::get_config;
use matchday_backend::run;
use matchday_backend::services::StorageService;
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "matchday-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    // The cache degrades to recomputation, so a missing Redis is not fatal.
    let redis_client =
        match redis::Client::open(config.redis.get_redis_url().expose_secret()) {
            Ok(client) => {
                tracing::info!("Redis client created");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!("Failed to create Redis client, caching disabled: {}", e);
                None
            }
        };

    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
        .expect("Failed to create Postgres connection pool");

    let storage_service = StorageService::new(&config.storage)
        .await
        .expect("Failed to initialize object storage");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, connection_pool, redis_client, storage_service)?.await
}
