use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::stats::{PlayerSeasonStats, PlayerStatLine, TeamSeasonStats, TeamStatLine};

// Team season stats

pub async fn current_team_stats<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
) -> Result<Option<TeamSeasonStats>, sqlx::Error> {
    sqlx::query_as::<_, TeamSeasonStats>(
        "SELECT * FROM team_season_stats WHERE team_id = $1 AND is_current",
    )
    .bind(team_id)
    .fetch_optional(executor)
    .await
}

pub async fn save_team_stats<'e>(
    executor: impl PgExecutor<'e>,
    stats: &TeamSeasonStats,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE team_season_stats
        SET wins = $1, losses = $2, draws = $3, goals_scored = $4,
            goals_conceded = $5, clean_sheets = $6, updated_at = NOW()
        WHERE id = $7
        "#,
    )
    .bind(stats.wins)
    .bind(stats.losses)
    .bind(stats.draws)
    .bind(stats.goals_scored)
    .bind(stats.goals_conceded)
    .bind(stats.clean_sheets)
    .bind(stats.id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_team_stats<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
    league_id: Uuid,
    season: i32,
) -> Result<TeamSeasonStats, sqlx::Error> {
    sqlx::query_as::<_, TeamSeasonStats>(
        r#"
        INSERT INTO team_season_stats (team_id, league_id, season)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(team_id)
    .bind(league_id)
    .bind(season)
    .fetch_one(executor)
    .await
}

pub async fn archive_team_stats<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE team_season_stats SET is_current = FALSE, updated_at = NOW()
         WHERE team_id = $1 AND is_current",
    )
    .bind(team_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn team_stats_history<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
) -> Result<Vec<TeamSeasonStats>, sqlx::Error> {
    sqlx::query_as::<_, TeamSeasonStats>(
        "SELECT * FROM team_season_stats WHERE team_id = $1 AND NOT is_current
         ORDER BY season DESC",
    )
    .bind(team_id)
    .fetch_all(executor)
    .await
}

/// Current-season stat lines with team names for every team in a league.
pub async fn team_stat_lines<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
) -> Result<Vec<TeamStatLine>, sqlx::Error> {
    sqlx::query_as::<_, TeamStatLine>(
        r#"
        SELECT
            ts.team_id,
            t.name AS team_name,
            ts.wins, ts.losses, ts.draws,
            ts.goals_scored, ts.goals_conceded
        FROM team_season_stats ts
        JOIN teams t ON ts.team_id = t.id
        WHERE ts.league_id = $1 AND ts.is_current
        ORDER BY t.created_at, t.id
        "#,
    )
    .bind(league_id)
    .fetch_all(executor)
    .await
}

// Player season stats

pub async fn current_player_stats<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
) -> Result<Option<PlayerSeasonStats>, sqlx::Error> {
    sqlx::query_as::<_, PlayerSeasonStats>(
        "SELECT * FROM player_season_stats WHERE player_id = $1 AND is_current",
    )
    .bind(player_id)
    .fetch_optional(executor)
    .await
}

pub async fn save_player_stats<'e>(
    executor: impl PgExecutor<'e>,
    stats: &PlayerSeasonStats,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE player_season_stats
        SET games = $1, goals = $2, assists = $3, clean_sheets = $4,
            player_of_the_match = $5, avg_rating = $6, updated_at = NOW()
        WHERE id = $7
        "#,
    )
    .bind(stats.games)
    .bind(stats.goals)
    .bind(stats.assists)
    .bind(stats.clean_sheets)
    .bind(stats.player_of_the_match)
    .bind(stats.avg_rating)
    .bind(stats.id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_player_stats<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
    league_id: Uuid,
    season: i32,
) -> Result<PlayerSeasonStats, sqlx::Error> {
    sqlx::query_as::<_, PlayerSeasonStats>(
        r#"
        INSERT INTO player_season_stats (player_id, league_id, season)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(player_id)
    .bind(league_id)
    .bind(season)
    .fetch_one(executor)
    .await
}

pub async fn archive_player_stats<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE player_season_stats SET is_current = FALSE, updated_at = NOW()
         WHERE player_id = $1 AND is_current",
    )
    .bind(player_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn player_stats_history<'e>(
    executor: impl PgExecutor<'e>,
    player_id: Uuid,
) -> Result<Vec<PlayerSeasonStats>, sqlx::Error> {
    sqlx::query_as::<_, PlayerSeasonStats>(
        "SELECT * FROM player_season_stats WHERE player_id = $1 AND NOT is_current
         ORDER BY season DESC",
    )
    .bind(player_id)
    .fetch_all(executor)
    .await
}

/// Current-season stat lines with names for every player in a league.
pub async fn player_stat_lines<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
) -> Result<Vec<PlayerStatLine>, sqlx::Error> {
    sqlx::query_as::<_, PlayerStatLine>(
        r#"
        SELECT
            ps.player_id,
            p.name AS player_name,
            t.name AS team_name,
            ps.games, ps.goals, ps.assists, ps.avg_rating
        FROM player_season_stats ps
        JOIN players p ON ps.player_id = p.id
        LEFT JOIN teams t ON p.team_id = t.id
        WHERE ps.league_id = $1 AND ps.is_current
        "#,
    )
    .bind(league_id)
    .fetch_all(executor)
    .await
}

// Season rollover (set-based, one statement per table)

/// Archive every member team's current record for a league season.
pub async fn archive_league_team_stats<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE team_season_stats SET is_current = FALSE, updated_at = NOW()
         WHERE league_id = $1 AND is_current",
    )
    .bind(league_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn archive_league_player_stats<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE player_season_stats SET is_current = FALSE, updated_at = NOW()
         WHERE league_id = $1 AND is_current",
    )
    .bind(league_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Insert zero-valued current rows for every team in the league.
pub async fn open_league_team_stats<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO team_season_stats (team_id, league_id, season)
        SELECT id, $1, $2 FROM teams WHERE league_id = $1
        "#,
    )
    .bind(league_id)
    .bind(season)
    .execute(executor)
    .await?;
    Ok(())
}

/// Insert zero-valued current rows for every player on a team in the league.
pub async fn open_league_player_stats<'e>(
    executor: impl PgExecutor<'e>,
    league_id: Uuid,
    season: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO player_season_stats (player_id, league_id, season)
        SELECT p.id, $1, $2 FROM players p
        JOIN teams t ON p.team_id = t.id
        WHERE t.league_id = $1
        "#,
    )
    .bind(league_id)
    .bind(season)
    .execute(executor)
    .await?;
    Ok(())
}
