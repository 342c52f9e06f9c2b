use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::team::Team;

pub async fn insert_team<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>("INSERT INTO teams (name) VALUES ($1) RETURNING *")
        .bind(name)
        .fetch_one(executor)
        .await
}

pub async fn find_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(executor)
        .await
}

pub async fn set_team_league<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
    league_id: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE teams SET league_id = $1, updated_at = NOW() WHERE id = $2")
        .bind(league_id)
        .bind(team_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn set_team_image<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
    image_url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE teams SET image_url = $1, updated_at = NOW() WHERE id = $2")
        .bind(image_url)
        .bind(team_id)
        .execute(executor)
        .await?;
    Ok(())
}
