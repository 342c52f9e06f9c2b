use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{league_queries, player_queries, stats_queries, team_queries};
use crate::errors::ApiError;
use crate::models::league::LeagueResponse;
use crate::services::cache::CacheService;

/// League membership: joining a team opens stat records for it and its
/// squad, leaving archives them.
pub struct LeagueService {
    pool: PgPool,
    cache: CacheService,
}

impl LeagueService {
    pub fn new(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    pub async fn get_league(&self, league_id: Uuid) -> Result<LeagueResponse, ApiError> {
        let league = league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let team_ids = league_queries::team_ids_in_league(&self.pool, league_id).await?;
        Ok(LeagueResponse { league, team_ids })
    }

    #[tracing::instrument(name = "Add team to league", skip(self))]
    pub async fn add_team(&self, league_id: Uuid, team_id: Uuid) -> Result<(), ApiError> {
        let league = league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let team = team_queries::find_team(&self.pool, team_id)
            .await?
            .ok_or(ApiError::NotFound("team"))?;
        if let Some(existing) = team.league_id {
            if existing == league_id {
                return Err(ApiError::Validation(
                    "team is already a member of this league".into(),
                ));
            }
            return Err(ApiError::Validation(
                "team already belongs to another league".into(),
            ));
        }

        let season = league.current_season;
        let player_ids = player_queries::player_ids_in_team(&self.pool, team_id).await?;

        let mut tx = self.pool.begin().await?;
        team_queries::set_team_league(&mut *tx, team_id, Some(league_id)).await?;
        stats_queries::insert_team_stats(&mut *tx, team_id, league_id, season).await?;
        for player_id in player_ids {
            stats_queries::insert_player_stats(&mut *tx, player_id, league_id, season).await?;
        }
        tx.commit().await?;

        self.cache.invalidate_league(league_id).await;
        tracing::info!(team_id = %team_id, league_id = %league_id, "Team joined league");
        Ok(())
    }

    #[tracing::instrument(name = "Remove team from league", skip(self))]
    pub async fn remove_team(&self, league_id: Uuid, team_id: Uuid) -> Result<(), ApiError> {
        league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let team = team_queries::find_team(&self.pool, team_id)
            .await?
            .ok_or(ApiError::NotFound("team"))?;
        if team.league_id != Some(league_id) {
            return Err(ApiError::Validation(
                "team is not a member of this league".into(),
            ));
        }

        let player_ids = player_queries::player_ids_in_team(&self.pool, team_id).await?;

        // Records archive rather than delete, so the league's season history
        // still shows teams that left mid-season.
        let mut tx = self.pool.begin().await?;
        team_queries::set_team_league(&mut *tx, team_id, None).await?;
        stats_queries::archive_team_stats(&mut *tx, team_id).await?;
        for player_id in player_ids {
            stats_queries::archive_player_stats(&mut *tx, player_id).await?;
        }
        tx.commit().await?;

        self.cache.invalidate_league(league_id).await;
        tracing::info!(team_id = %team_id, league_id = %league_id, "Team left league");
        Ok(())
    }
}
