use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{league_queries, stats_queries};
use crate::errors::ApiError;
use crate::models::stats::{LeaderboardEntry, PlayerStatLine, TableRow, TeamStatLine};
use crate::services::cache::{self, CacheService, LEAGUE_CACHE_TTL_SECONDS};

pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Compute the league table from current-season stat lines.
///
/// Sort priority: points, then goal difference, then goals scored. The sort
/// is stable, so teams tied on all three keep their input order.
pub fn compute_table(lines: &[TeamStatLine]) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = lines
        .iter()
        .map(|line| TableRow {
            team_id: line.team_id,
            team_name: line.team_name.clone(),
            games_played: line.wins + line.losses + line.draws,
            wins: line.wins,
            draws: line.draws,
            losses: line.losses,
            goals_scored: line.goals_scored,
            goals_conceded: line.goals_conceded,
            goal_difference: line.goals_scored - line.goals_conceded,
            points: line.wins * 3 + line.draws,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_scored.cmp(&a.goals_scored))
    });
    rows
}

/// Which per-player metric a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMetric {
    Goals,
    Assists,
    AvgRating,
}

impl LeaderboardMetric {
    pub fn cache_tag(&self) -> &'static str {
        match self {
            LeaderboardMetric::Goals => "goals",
            LeaderboardMetric::Assists => "assists",
            LeaderboardMetric::AvgRating => "rating",
        }
    }

    fn value(&self, line: &PlayerStatLine) -> f64 {
        match self {
            LeaderboardMetric::Goals => line.goals as f64,
            LeaderboardMetric::Assists => line.assists as f64,
            LeaderboardMetric::AvgRating => line.avg_rating,
        }
    }
}

/// Rank every player by the metric, descending. The per-game rate is 0 for
/// players without games. Truncation happens at the call site so the full
/// ranking can be cached once per metric.
pub fn rank_players(lines: &[PlayerStatLine], metric: LeaderboardMetric) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = lines
        .iter()
        .map(|line| {
            let value = metric.value(line);
            LeaderboardEntry {
                player_id: line.player_id,
                player_name: line.player_name.clone(),
                team_name: line.team_name.clone(),
                games: line.games,
                value,
                per_game: if line.games > 0 {
                    value / line.games as f64
                } else {
                    0.0
                },
            }
        })
        .collect();
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

/// Reads aggregate state and serves tables and leaderboards, cache-first.
pub struct TableService {
    pool: PgPool,
    cache: CacheService,
}

impl TableService {
    pub fn new(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    pub async fn get_league_table(&self, league_id: Uuid) -> Result<Vec<TableRow>, ApiError> {
        let key = cache::league_table_key(league_id);
        if let Some(cached) = self.cache.get_json::<Vec<TableRow>>(&key).await {
            return Ok(cached);
        }

        league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let lines = stats_queries::team_stat_lines(&self.pool, league_id).await?;
        let table = compute_table(&lines);

        self.cache.set_json(&key, &table, LEAGUE_CACHE_TTL_SECONDS).await;
        Ok(table)
    }

    pub async fn get_leaderboard(
        &self,
        league_id: Uuid,
        metric: LeaderboardMetric,
        limit: Option<i64>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).max(1) as usize;
        let key = cache::leaderboard_key(league_id, metric.cache_tag());

        let mut ranking = match self.cache.get_json::<Vec<LeaderboardEntry>>(&key).await {
            Some(cached) => cached,
            None => {
                league_queries::find_league(&self.pool, league_id)
                    .await?
                    .ok_or(ApiError::NotFound("league"))?;
                let lines = stats_queries::player_stat_lines(&self.pool, league_id).await?;
                let ranking = rank_players(&lines, metric);
                self.cache.set_json(&key, &ranking, LEAGUE_CACHE_TTL_SECONDS).await;
                ranking
            }
        };

        ranking.truncate(limit);
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, wins: i32, draws: i32, losses: i32, gs: i32, gc: i32) -> TeamStatLine {
        TeamStatLine {
            team_id: Uuid::new_v4(),
            team_name: name.to_string(),
            wins,
            losses,
            draws,
            goals_scored: gs,
            goals_conceded: gc,
        }
    }

    #[test]
    fn table_orders_by_points_then_gd_then_goals() {
        // a and b tie on points; b has the better goal difference.
        // c and d tie on points and goal difference; d scored more.
        let a = line("a", 2, 0, 2, 5, 4);
        let b = line("b", 2, 0, 2, 6, 2);
        let c = line("c", 1, 1, 2, 3, 3);
        let d = line("d", 1, 1, 2, 7, 7);
        let table = compute_table(&[a, b, c, d]);

        let names: Vec<&str> = table.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "d", "c"]);
        assert_eq!(table[0].points, 6);
        assert_eq!(table[0].goal_difference, 4);
        assert_eq!(table[2].games_played, 4);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let first = line("first", 1, 0, 0, 2, 1);
        let second = line("second", 1, 0, 0, 2, 1);
        let table = compute_table(&[first, second]);
        assert_eq!(table[0].team_name, "first");
        assert_eq!(table[1].team_name, "second");
    }

    #[test]
    fn leaderboard_reports_per_game_rate() {
        let lines = vec![
            PlayerStatLine {
                player_id: Uuid::new_v4(),
                player_name: "ten goals".into(),
                team_name: None,
                games: 5,
                goals: 10,
                assists: 2,
                avg_rating: 7.1,
            },
            PlayerStatLine {
                player_id: Uuid::new_v4(),
                player_name: "no games".into(),
                team_name: None,
                games: 0,
                goals: 0,
                assists: 0,
                avg_rating: 0.0,
            },
        ];
        let ranked = rank_players(&lines, LeaderboardMetric::Goals);
        assert_eq!(ranked[0].player_name, "ten goals");
        assert!((ranked[0].per_game - 2.0).abs() < 1e-9);
        assert_eq!(ranked[1].per_game, 0.0);
    }
}
