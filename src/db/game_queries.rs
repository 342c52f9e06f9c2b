use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::game::{Game, GamePerformance, GameStatus, PerformanceInput};

pub async fn insert_game<'e>(
    executor: impl PgExecutor<'e>,
    fixture_id: Uuid,
    league_id: Uuid,
    season: i32,
    home_team_id: Uuid,
    away_team_id: Uuid,
) -> Result<Game, sqlx::Error> {
    sqlx::query_as::<_, Game>(
        r#"
        INSERT INTO games (fixture_id, league_id, season, home_team_id, away_team_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(fixture_id)
    .bind(league_id)
    .bind(season)
    .bind(home_team_id)
    .bind(away_team_id)
    .fetch_one(executor)
    .await
}

pub async fn find_game<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
) -> Result<Option<Game>, sqlx::Error> {
    sqlx::query_as::<_, Game>("SELECT * FROM games WHERE id = $1")
        .bind(game_id)
        .fetch_optional(executor)
        .await
}

pub async fn games_for_fixture<'e>(
    executor: impl PgExecutor<'e>,
    fixture_id: Uuid,
) -> Result<Vec<Game>, sqlx::Error> {
    sqlx::query_as::<_, Game>("SELECT * FROM games WHERE fixture_id = $1 ORDER BY created_at")
        .bind(fixture_id)
        .fetch_all(executor)
        .await
}

pub async fn store_result<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
    home_goals: i32,
    away_goals: i32,
    played_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE games
        SET home_goals = $1, away_goals = $2, played_at = $3,
            status = 'played', updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(home_goals)
    .bind(away_goals)
    .bind(played_at)
    .bind(game_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn set_status<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
    status: GameStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE games SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status.as_str())
        .bind(game_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn delete_game<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM games WHERE id = $1")
        .bind(game_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Completed games for one team in one season, oldest round first. The streak
/// calculator depends on this ordering.
pub async fn completed_games_for_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
    season: i32,
) -> Result<Vec<Game>, sqlx::Error> {
    sqlx::query_as::<_, Game>(
        r#"
        SELECT g.* FROM games g
        JOIN fixtures f ON g.fixture_id = f.id
        WHERE (g.home_team_id = $1 OR g.away_team_id = $1)
          AND g.season = $2
          AND g.status IN ('played', 'completed')
        ORDER BY f.round
        "#,
    )
    .bind(team_id)
    .bind(season)
    .fetch_all(executor)
    .await
}

pub async fn performances_for_side<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
    is_home: bool,
) -> Result<Vec<GamePerformance>, sqlx::Error> {
    sqlx::query_as::<_, GamePerformance>(
        "SELECT * FROM game_performances WHERE game_id = $1 AND is_home = $2",
    )
    .bind(game_id)
    .bind(is_home)
    .fetch_all(executor)
    .await
}

pub async fn count_performances_for_side<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
    is_home: bool,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM game_performances WHERE game_id = $1 AND is_home = $2",
    )
    .bind(game_id)
    .bind(is_home)
    .fetch_one(executor)
    .await
}

pub async fn delete_performances_for_side<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
    is_home: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM game_performances WHERE game_id = $1 AND is_home = $2")
        .bind(game_id)
        .bind(is_home)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn insert_performance<'e>(
    executor: impl PgExecutor<'e>,
    game_id: Uuid,
    input: &PerformanceInput,
    is_home: bool,
    clean_sheet: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO game_performances
            (game_id, player_id, is_home, rating, goals, assists,
             player_of_the_match, clean_sheet, position)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(game_id)
    .bind(input.player_id)
    .bind(is_home)
    .bind(input.rating)
    .bind(input.goals)
    .bind(input.assists)
    .bind(input.player_of_the_match)
    .bind(clean_sheet)
    .bind(&input.position)
    .execute(executor)
    .await?;
    Ok(())
}

/// All performances from completed league games inside a date window. Feeds
/// the team-of-the-week engine.
pub async fn performances_in_window<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<GamePerformance>, sqlx::Error> {
    sqlx::query_as::<_, GamePerformance>(
        r#"
        SELECT gp.* FROM game_performances gp
        JOIN games g ON gp.game_id = g.id
        WHERE g.league_id = $1
          AND g.status = 'completed'
          AND g.played_at >= $2
          AND g.played_at <= $3
        "#,
    )
    .bind(league_id)
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await
}
