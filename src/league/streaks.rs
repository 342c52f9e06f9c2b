use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{game_queries, team_queries};
use crate::errors::ApiError;

/// One game's score from the perspective of the team being analyzed.
#[derive(Debug, Clone, Copy)]
pub struct GameOutcome {
    pub scored: i32,
    pub conceded: i32,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamStreaks {
    pub longest_win_streak: i32,
    pub longest_unbeaten_streak: i32,
    pub longest_lose_streak: i32,
    pub longest_scoreless_streak: i32,
}

/// Longest win / unbeaten / lose / scoreless runs over a chronological game
/// list. Input must already be sorted ascending; this function does not sort.
pub fn compute_streaks(games: &[GameOutcome]) -> TeamStreaks {
    let mut streaks = TeamStreaks::default();
    let mut win = 0;
    let mut unbeaten = 0;
    let mut lose = 0;
    let mut scoreless = 0;

    for game in games {
        if game.scored > game.conceded {
            win += 1;
            unbeaten += 1;
            lose = 0;
        } else if game.scored == game.conceded {
            unbeaten += 1;
            win = 0;
            lose = 0;
        } else {
            lose += 1;
            win = 0;
            unbeaten = 0;
        }
        if game.scored == 0 {
            scoreless += 1;
        } else {
            scoreless = 0;
        }

        streaks.longest_win_streak = streaks.longest_win_streak.max(win);
        streaks.longest_unbeaten_streak = streaks.longest_unbeaten_streak.max(unbeaten);
        streaks.longest_lose_streak = streaks.longest_lose_streak.max(lose);
        streaks.longest_scoreless_streak = streaks.longest_scoreless_streak.max(scoreless);
    }

    streaks
}

/// Serves streak statistics from a team's raw match history.
pub struct AdvancedStatsService {
    pool: PgPool,
}

impl AdvancedStatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_team_advanced_stats(&self, team_id: Uuid) -> Result<TeamStreaks, ApiError> {
        let team = team_queries::find_team(&self.pool, team_id)
            .await?
            .ok_or(ApiError::NotFound("team"))?;

        let league_id = match team.league_id {
            Some(league_id) => league_id,
            // A team outside any league has no match history to scan.
            None => return Ok(TeamStreaks::default()),
        };
        let league = crate::db::league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;

        let games =
            game_queries::completed_games_for_team(&self.pool, team_id, league.current_season)
                .await?;
        let outcomes: Vec<GameOutcome> = games
            .iter()
            .filter_map(|g| {
                let (home, away) = (g.home_goals?, g.away_goals?);
                Some(if g.home_team_id == team_id {
                    GameOutcome { scored: home, conceded: away }
                } else {
                    GameOutcome { scored: away, conceded: home }
                })
            })
            .collect();

        Ok(compute_streaks(&outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(scored: i32, conceded: i32) -> GameOutcome {
        GameOutcome { scored, conceded }
    }

    #[test]
    fn empty_history_has_no_streaks() {
        assert_eq!(compute_streaks(&[]), TeamStreaks::default());
    }

    #[test]
    fn documented_example() {
        // W 3-0, W 1-0, D 0-0, L 0-1
        let streaks = compute_streaks(&[game(3, 0), game(1, 0), game(0, 0), game(0, 1)]);
        assert_eq!(streaks.longest_win_streak, 2);
        assert_eq!(streaks.longest_unbeaten_streak, 3);
        assert_eq!(streaks.longest_lose_streak, 1);
        // The draw and the loss are both scoreless games.
        assert_eq!(streaks.longest_scoreless_streak, 2);
    }

    #[test]
    fn loss_resets_win_and_unbeaten() {
        let streaks = compute_streaks(&[
            game(2, 0),
            game(1, 2),
            game(1, 1),
            game(3, 1),
            game(2, 1),
        ]);
        assert_eq!(streaks.longest_win_streak, 2);
        assert_eq!(streaks.longest_unbeaten_streak, 3);
        assert_eq!(streaks.longest_lose_streak, 1);
        assert_eq!(streaks.longest_scoreless_streak, 0);
    }

    #[test]
    fn scoreless_counts_across_results() {
        // A scoreless win cannot happen, but scoreless draws and losses chain.
        let streaks = compute_streaks(&[game(0, 0), game(0, 3), game(0, 0), game(1, 0)]);
        assert_eq!(streaks.longest_scoreless_streak, 3);
    }
}
