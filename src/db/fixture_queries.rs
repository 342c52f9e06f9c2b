use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::league::Fixture;

pub async fn insert_fixture<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
    round: i32,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Fixture, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(
        r#"
        INSERT INTO fixtures (league_id, season, round, window_start, window_end)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(league_id)
    .bind(season)
    .bind(round)
    .bind(window_start)
    .bind(window_end)
    .fetch_one(executor)
    .await
}

pub async fn fixtures_for_league<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
) -> Result<Vec<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(
        "SELECT * FROM fixtures WHERE league_id = $1 AND season = $2 ORDER BY round",
    )
    .bind(league_id)
    .bind(season)
    .fetch_all(executor)
    .await
}

pub async fn round_exists<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
    round: i32,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM fixtures WHERE league_id = $1 AND season = $2 AND round = $3",
    )
    .bind(league_id)
    .bind(season)
    .bind(round)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn count_fixtures<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM fixtures WHERE league_id = $1 AND season = $2")
        .bind(league_id)
        .bind(season)
        .fetch_one(executor)
        .await
}
