use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::player::{Player, PlayerCard};

pub async fn insert_player<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    preferred_position: Option<&str>,
) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        "INSERT INTO players (name, preferred_position) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(preferred_position)
    .fetch_one(executor)
    .await
}

pub async fn find_player<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = $1")
        .bind(player_id)
        .fetch_optional(executor)
        .await
}

pub async fn set_player_team<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
    team_id: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE players SET team_id = $1, updated_at = NOW() WHERE id = $2")
        .bind(team_id)
        .bind(player_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn set_player_image<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
    image_url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE players SET image_url = $1, updated_at = NOW() WHERE id = $2")
        .bind(image_url)
        .bind(player_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn player_ids_in_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM players WHERE team_id = $1")
        .bind(team_id)
        .fetch_all(executor)
        .await
}

/// Batch fetch of name/image cards for a set of players, one round trip.
pub async fn player_cards<'e>(
    executor: impl PgExecutor<'e>,
    player_ids: &[Uuid],
) -> Result<Vec<PlayerCard>, sqlx::Error> {
    sqlx::query_as::<_, PlayerCard>(
        r#"
        SELECT
            p.id AS player_id,
            p.name AS player_name,
            p.image_url AS player_image,
            t.name AS team_name,
            t.image_url AS team_image
        FROM players p
        LEFT JOIN teams t ON p.team_id = t.id
        WHERE p.id = ANY($1)
        "#,
    )
    .bind(player_ids)
    .fetch_all(executor)
    .await
}
