use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{game_queries, stats_queries};
use crate::errors::ApiError;
use crate::league::stats::PerformanceDelta;
use crate::models::game::{GamePerformance, GameStatus, PerformanceInput};
use crate::services::cache::CacheService;

/// Orchestrates the game state machine and keeps aggregate statistics in
/// lockstep with result and performance writes. Every public operation runs
/// as one transaction: a failure anywhere rolls back the statistics, the
/// result, and the status change together.
pub struct ResultService {
    pool: PgPool,
    cache: CacheService,
}

impl ResultService {
    pub fn new(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    /// Record (or correct) a final score.
    ///
    /// On correction the previously applied team statistics are reverted with
    /// the old score before the new one is applied, so entering the same
    /// score twice leaves statistics identical to entering it once.
    pub async fn update_game_result(
        &self,
        game_id: Uuid,
        home_goals: i32,
        away_goals: i32,
        played_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        if home_goals < 0 || away_goals < 0 {
            return Err(ApiError::Validation("goals cannot be negative".into()));
        }

        let mut tx = self.pool.begin().await?;

        let game = game_queries::find_game(&mut *tx, game_id)
            .await?
            .ok_or(ApiError::NotFound("game"))?;
        if matches!(game.status, GameStatus::Postponed | GameStatus::Cancelled) {
            return Err(ApiError::Validation(format!(
                "cannot record a result for a {} game",
                game.status.as_str()
            )));
        }

        let mut home_stats = stats_queries::current_team_stats(&mut *tx, game.home_team_id)
            .await?
            .ok_or(ApiError::NotFound("home team season stats"))?;
        let mut away_stats = stats_queries::current_team_stats(&mut *tx, game.away_team_id)
            .await?
            .ok_or(ApiError::NotFound("away team season stats"))?;

        if let (Some(old_home), Some(old_away)) = (game.home_goals, game.away_goals) {
            tracing::info!(
                "Correcting result for game {}: {} - {} becomes {} - {}",
                game_id,
                old_home,
                old_away,
                home_goals,
                away_goals
            );
            home_stats.revert_result(old_home, old_away);
            away_stats.revert_result(old_away, old_home);
        }

        home_stats.apply_result(home_goals, away_goals);
        away_stats.apply_result(away_goals, home_goals);

        stats_queries::save_team_stats(&mut *tx, &home_stats).await?;
        stats_queries::save_team_stats(&mut *tx, &away_stats).await?;
        game_queries::store_result(&mut *tx, game_id, home_goals, away_goals, played_at).await?;

        tx.commit().await?;

        self.cache.invalidate_league(game.league_id).await;
        tracing::info!(
            "Recorded result for game {}: {} - {}",
            game_id,
            home_goals,
            away_goals
        );
        Ok(())
    }

    /// Record (or replace) one side's player performances.
    ///
    /// Requires a result to exist. Clean sheets are derived from the
    /// opponent's goals. When both sides have performances recorded the game
    /// transitions to Completed.
    pub async fn record_team_performance(
        &self,
        game_id: Uuid,
        is_home_team: bool,
        performances: Vec<PerformanceInput>,
    ) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;

        let game = game_queries::find_game(&mut *tx, game_id)
            .await?
            .ok_or(ApiError::NotFound("game"))?;
        if !game.status.has_result() {
            return Err(ApiError::Validation(
                "cannot record performances before the game result".into(),
            ));
        }

        let opponent_goals = if is_home_team {
            game.away_goals
        } else {
            game.home_goals
        }
        .ok_or_else(|| {
            ApiError::Invariant(format!(
                "game {} is {} but has no result",
                game_id,
                game.status.as_str()
            ))
        })?;
        let clean_sheet = opponent_goals == 0;

        // Correction: take back what the old list contributed.
        let previous = game_queries::performances_for_side(&mut *tx, game_id, is_home_team).await?;
        if !previous.is_empty() {
            tracing::info!(
                "Replacing {} recorded performances for game {} ({} side)",
                previous.len(),
                game_id,
                if is_home_team { "home" } else { "away" }
            );
            for old in &previous {
                let mut stats = stats_queries::current_player_stats(&mut *tx, old.player_id)
                    .await?
                    .ok_or(ApiError::NotFound("player season stats"))?;
                stats.revert_performance(&delta_from_row(old));
                stats_queries::save_player_stats(&mut *tx, &stats).await?;
            }
            game_queries::delete_performances_for_side(&mut *tx, game_id, is_home_team).await?;
        }

        for input in &performances {
            let mut stats = stats_queries::current_player_stats(&mut *tx, input.player_id)
                .await?
                .ok_or(ApiError::NotFound("player season stats"))?;
            stats.apply_performance(&PerformanceDelta {
                rating: input.rating,
                goals: input.goals,
                assists: input.assists,
                player_of_the_match: input.player_of_the_match,
                clean_sheet,
            });
            stats_queries::save_player_stats(&mut *tx, &stats).await?;
            game_queries::insert_performance(&mut *tx, game_id, input, is_home_team, clean_sheet)
                .await?;
        }

        let other_side =
            game_queries::count_performances_for_side(&mut *tx, game_id, !is_home_team).await?;
        let status = if !performances.is_empty() && other_side > 0 {
            GameStatus::Completed
        } else {
            GameStatus::Played
        };
        game_queries::set_status(&mut *tx, game_id, status).await?;

        tx.commit().await?;

        self.cache.invalidate_league(game.league_id).await;
        tracing::info!(
            "Recorded {} performances for game {} ({} side), status now {}",
            performances.len(),
            game_id,
            if is_home_team { "home" } else { "away" },
            status.as_str()
        );
        Ok(())
    }

    /// Postpone or cancel a game that has not been played yet. Both states
    /// are terminal for statistics purposes; a result can no longer be
    /// recorded against the game.
    pub async fn mark_game_status(
        &self,
        game_id: Uuid,
        status: GameStatus,
    ) -> Result<(), ApiError> {
        if !matches!(status, GameStatus::Postponed | GameStatus::Cancelled) {
            return Err(ApiError::Validation(
                "only postponed or cancelled can be set directly".into(),
            ));
        }
        let game = game_queries::find_game(&self.pool, game_id)
            .await?
            .ok_or(ApiError::NotFound("game"))?;
        if game.status != GameStatus::Scheduled {
            return Err(ApiError::Validation(format!(
                "cannot mark a {} game as {}",
                game.status.as_str(),
                status.as_str()
            )));
        }
        game_queries::set_status(&self.pool, game_id, status).await?;
        tracing::info!("Game {} marked {}", game_id, status.as_str());
        Ok(())
    }

    /// Remove a game and its performance rows. Accumulated statistics are not
    /// reverted here; callers correcting history record a fixed result first.
    pub async fn delete_game(&self, game_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;
        let game = game_queries::find_game(&mut *tx, game_id)
            .await?
            .ok_or(ApiError::NotFound("game"))?;
        game_queries::delete_performances_for_side(&mut *tx, game_id, true).await?;
        game_queries::delete_performances_for_side(&mut *tx, game_id, false).await?;
        game_queries::delete_game(&mut *tx, game_id).await?;
        tx.commit().await?;

        self.cache.invalidate_league(game.league_id).await;
        tracing::info!("Deleted game {}", game_id);
        Ok(())
    }
}

fn delta_from_row(row: &GamePerformance) -> PerformanceDelta {
    PerformanceDelta {
        rating: row.rating,
        goals: row.goals,
        assists: row.assists,
        player_of_the_match: row.player_of_the_match,
        clean_sheet: row.clean_sheet,
    }
}
