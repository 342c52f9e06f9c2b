use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{league_queries, stats_queries};
use crate::errors::ApiError;
use crate::models::league::League;
use crate::services::cache::CacheService;

/// Archives a finished season and opens the next one in a single transaction.
pub struct SeasonService {
    pool: PgPool,
    cache: CacheService,
}

impl SeasonService {
    pub fn new(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    /// Close the league's current season and open the next.
    ///
    /// Every current team and player record is flipped to archived, then
    /// fresh zero-valued records open for each current member. Either the
    /// whole rollover lands or none of it does.
    #[tracing::instrument(name = "Start new season", skip(self))]
    pub async fn start_new_season(&self, league_id: Uuid) -> Result<League, ApiError> {
        let league = league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let next_season = league.current_season + 1;

        let mut tx = self.pool.begin().await?;
        stats_queries::archive_league_team_stats(&mut *tx, league_id).await?;
        stats_queries::archive_league_player_stats(&mut *tx, league_id).await?;
        stats_queries::open_league_team_stats(&mut *tx, league_id, next_season).await?;
        stats_queries::open_league_player_stats(&mut *tx, league_id, next_season).await?;
        league_queries::set_current_season(&mut *tx, league_id, next_season).await?;
        tx.commit().await?;

        self.cache.invalidate_league(league_id).await;

        tracing::info!(
            league_id = %league_id,
            season = next_season,
            "Rolled league over to new season"
        );
        league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))
    }
}
