use crate::models::stats::{PlayerSeasonStats, TeamSeasonStats};

/// The per-game numbers folded into a player's running season record.
///
/// `apply_performance` and `revert_performance` are exact inverses: reverting
/// the same delta that was applied restores the record bit-for-bit, with the
/// single documented exception of `avg_rating` when the revert leaves one
/// game or none (see below).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceDelta {
    pub rating: f64,
    pub goals: i32,
    pub assists: i32,
    pub player_of_the_match: bool,
    pub clean_sheet: bool,
}

impl PlayerSeasonStats {
    pub fn apply_performance(&mut self, delta: &PerformanceDelta) {
        let games_before = self.games;
        self.goals += delta.goals;
        self.assists += delta.assists;
        if delta.player_of_the_match {
            self.player_of_the_match += 1;
        }
        if delta.clean_sheet {
            self.clean_sheets += 1;
        }
        self.avg_rating =
            (self.avg_rating * games_before as f64 + delta.rating) / (games_before + 1) as f64;
        self.games = games_before + 1;
    }

    /// Algebraic inverse of `apply_performance`. Counters floor at zero.
    ///
    /// When the revert leaves one game or none, `avg_rating` is forced to 0
    /// instead of recomputing a compensated mean. That policy is load-bearing:
    /// callers compare records for equality after revert cycles.
    pub fn revert_performance(&mut self, delta: &PerformanceDelta) {
        let games_before = self.games;
        let games_after = (games_before - 1).max(0);
        self.goals = (self.goals - delta.goals).max(0);
        self.assists = (self.assists - delta.assists).max(0);
        if delta.player_of_the_match {
            self.player_of_the_match = (self.player_of_the_match - 1).max(0);
        }
        if delta.clean_sheet {
            self.clean_sheets = (self.clean_sheets - 1).max(0);
        }
        if games_after <= 1 {
            self.avg_rating = 0.0;
        } else {
            self.avg_rating =
                (self.avg_rating * games_before as f64 - delta.rating) / games_after as f64;
        }
        self.games = games_after;
    }
}

impl TeamSeasonStats {
    /// Fold one final score into the record, from this team's perspective.
    pub fn apply_result(&mut self, scored: i32, conceded: i32) {
        self.goals_scored += scored;
        self.goals_conceded += conceded;
        if conceded == 0 {
            self.clean_sheets += 1;
        }
        if scored > conceded {
            self.wins += 1;
        } else if scored < conceded {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
    }

    /// Exact inverse of `apply_result` for the same score.
    pub fn revert_result(&mut self, scored: i32, conceded: i32) {
        self.goals_scored = (self.goals_scored - scored).max(0);
        self.goals_conceded = (self.goals_conceded - conceded).max(0);
        if conceded == 0 {
            self.clean_sheets = (self.clean_sheets - 1).max(0);
        }
        if scored > conceded {
            self.wins = (self.wins - 1).max(0);
        } else if scored < conceded {
            self.losses = (self.losses - 1).max(0);
        } else {
            self.draws = (self.draws - 1).max(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn player_stats() -> PlayerSeasonStats {
        PlayerSeasonStats {
            id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            league_id: None,
            season: 1,
            is_current: true,
            games: 0,
            goals: 0,
            assists: 0,
            clean_sheets: 0,
            player_of_the_match: 0,
            avg_rating: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn team_stats() -> TeamSeasonStats {
        TeamSeasonStats {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            league_id: None,
            season: 1,
            is_current: true,
            wins: 0,
            losses: 0,
            draws: 0,
            goals_scored: 0,
            goals_conceded: 0,
            clean_sheets: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn apply_updates_running_average() {
        let mut stats = player_stats();
        stats.apply_performance(&PerformanceDelta {
            rating: 8.0,
            goals: 2,
            assists: 1,
            player_of_the_match: true,
            clean_sheet: false,
        });
        stats.apply_performance(&PerformanceDelta {
            rating: 6.0,
            goals: 0,
            assists: 0,
            player_of_the_match: false,
            clean_sheet: true,
        });

        assert_eq!(stats.games, 2);
        assert_eq!(stats.goals, 2);
        assert_eq!(stats.assists, 1);
        assert_eq!(stats.player_of_the_match, 1);
        assert_eq!(stats.clean_sheets, 1);
        assert!((stats.avg_rating - 7.0).abs() < 1e-9);
    }

    #[test]
    fn revert_is_exact_inverse_of_apply() {
        let mut stats = player_stats();
        let base = PerformanceDelta {
            rating: 7.3,
            goals: 1,
            assists: 2,
            player_of_the_match: false,
            clean_sheet: true,
        };
        stats.apply_performance(&base);
        stats.apply_performance(&PerformanceDelta {
            rating: 6.1,
            goals: 0,
            assists: 0,
            player_of_the_match: true,
            clean_sheet: false,
        });
        let snapshot = stats.clone();

        let delta = PerformanceDelta {
            rating: 9.2,
            goals: 3,
            assists: 1,
            player_of_the_match: true,
            clean_sheet: true,
        };
        stats.apply_performance(&delta);
        stats.revert_performance(&delta);

        assert_eq!(stats.games, snapshot.games);
        assert_eq!(stats.goals, snapshot.goals);
        assert_eq!(stats.assists, snapshot.assists);
        assert_eq!(stats.clean_sheets, snapshot.clean_sheets);
        assert_eq!(stats.player_of_the_match, snapshot.player_of_the_match);
        assert!((stats.avg_rating - snapshot.avg_rating).abs() < 1e-9);
    }

    #[test]
    fn reverting_the_only_game_zeroes_avg_rating() {
        let mut stats = player_stats();
        let delta = PerformanceDelta {
            rating: 8.5,
            goals: 1,
            assists: 0,
            player_of_the_match: false,
            clean_sheet: false,
        };
        stats.apply_performance(&delta);
        stats.revert_performance(&delta);

        assert_eq!(stats.games, 0);
        assert_eq!(stats.avg_rating, 0.0);
    }

    #[test]
    fn reverting_down_to_one_game_forces_avg_to_zero() {
        let mut stats = player_stats();
        let first = PerformanceDelta {
            rating: 6.0,
            goals: 0,
            assists: 0,
            player_of_the_match: false,
            clean_sheet: false,
        };
        let second = PerformanceDelta { rating: 8.0, ..first };
        stats.apply_performance(&first);
        stats.apply_performance(&second);
        stats.revert_performance(&second);

        // Not the compensated mean 6.0: one remaining game zeroes the rating.
        assert_eq!(stats.games, 1);
        assert_eq!(stats.avg_rating, 0.0);
    }

    #[test]
    fn team_apply_classifies_outcomes() {
        let mut stats = team_stats();
        stats.apply_result(3, 0); // win, clean sheet
        stats.apply_result(1, 1); // draw
        stats.apply_result(0, 2); // loss

        assert_eq!(stats.wins, 1);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.goals_scored, 4);
        assert_eq!(stats.goals_conceded, 3);
        assert_eq!(stats.clean_sheets, 1);
        assert_eq!(stats.wins + stats.losses + stats.draws, 3);
    }

    #[test]
    fn team_revert_is_exact_inverse() {
        let mut stats = team_stats();
        stats.apply_result(2, 1);
        let snapshot = stats.clone();

        stats.apply_result(0, 0);
        stats.revert_result(0, 0);

        assert_eq!(stats, snapshot);
    }
}
