use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::league::League;

pub async fn insert_league<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
) -> Result<League, sqlx::Error> {
    sqlx::query_as::<_, League>(
        "INSERT INTO leagues (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn find_league<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE id = $1")
        .bind(league_id)
        .fetch_optional(executor)
        .await
}

pub async fn list_leagues<'e>(
    executor: impl PgExecutor<'e>,
) -> Result<Vec<League>, sqlx::Error> {
    sqlx::query_as::<_, League>("SELECT * FROM leagues ORDER BY created_at")
        .fetch_all(executor)
        .await
}

pub async fn set_current_season<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE leagues SET current_season = $1, updated_at = NOW() WHERE id = $2")
        .bind(season)
        .bind(league_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Member team ids in registration order. The scheduler relies on this order
/// being stable between calls.
pub async fn team_ids_in_league<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM teams WHERE league_id = $1 ORDER BY created_at, id",
    )
    .bind(league_id)
    .fetch_all(executor)
    .await
}
