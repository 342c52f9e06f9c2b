use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{fixture_queries, game_queries, league_queries};
use crate::errors::ApiError;
use crate::models::league::{CreateFixtureRequest, FixtureWithGames};

/// One scheduled pairing inside a round. `home` hosts `away`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundPairing {
    pub home: Uuid,
    pub away: Uuid,
}

/// A planned round: its 1-based number, the calendar window it defaults to,
/// and its pairings.
#[derive(Debug, Clone)]
pub struct RoundPlan {
    pub round: i32,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub pairings: Vec<RoundPairing>,
}

/// Generate a double round-robin using the circle method.
///
/// Team 0 stays fixed while the remaining teams rotate one position per round
/// (last moved to position 1). The first `n - 1` rounds cover every pairing
/// once; the second `n - 1` rounds repeat them with home and away swapped.
/// Rounds are grouped `fixtures_per_week` at a time into 7-day windows
/// starting at `start_date`.
///
/// Odd team counts are rejected; callers that want a bye must append a
/// placeholder team themselves.
pub fn generate_rounds(
    team_ids: &[Uuid],
    start_date: DateTime<Utc>,
    fixtures_per_week: u32,
) -> Result<Vec<RoundPlan>, ApiError> {
    let n = team_ids.len();
    if n < 2 {
        return Err(ApiError::Validation(
            "a schedule requires at least 2 teams".into(),
        ));
    }
    if n % 2 != 0 {
        return Err(ApiError::Validation(format!(
            "cannot schedule {} teams; register an even number of teams (add a bye team if needed)",
            n
        )));
    }
    if fixtures_per_week == 0 {
        return Err(ApiError::Validation(
            "fixtures_per_week must be at least 1".into(),
        ));
    }

    let total_rounds = 2 * (n - 1);
    let mut ring: Vec<Uuid> = team_ids.to_vec();
    let mut rounds = Vec::with_capacity(total_rounds);

    for round_idx in 0..total_rounds {
        // Second half of the double round: invert home advantage.
        let reverse_order = round_idx >= n - 1;

        let mut pairings = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            let a = ring[i];
            let b = ring[n - 1 - i];
            let (home, away) = if reverse_order { (b, a) } else { (a, b) };
            pairings.push(RoundPairing { home, away });
        }

        // Rotate: position 0 is fixed, the last team moves to position 1.
        if let Some(last) = ring.pop() {
            ring.insert(1, last);
        }

        let week = (round_idx as i64) / (fixtures_per_week as i64);
        let window_start = start_date + Duration::weeks(week);
        rounds.push(RoundPlan {
            round: (round_idx + 1) as i32,
            window_start,
            window_end: window_start + Duration::days(7),
            pairings,
        });
    }

    Ok(rounds)
}

/// Service that turns round plans into persisted fixtures and games.
pub struct ScheduleService {
    pool: PgPool,
}

impl ScheduleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Generate and persist the full season calendar for a league.
    ///
    /// Fails if the league already has fixtures for its current season; a
    /// regeneration would duplicate round numbers.
    pub async fn generate_league_fixtures(
        &self,
        league_id: Uuid,
        start_date: DateTime<Utc>,
        fixtures_per_week: u32,
    ) -> Result<Vec<FixtureWithGames>, ApiError> {
        let league = league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let season = league.current_season;

        let existing = fixture_queries::count_fixtures(&self.pool, league_id, season).await?;
        if existing > 0 {
            return Err(ApiError::Validation(format!(
                "league already has {} fixtures for season {}",
                existing, season
            )));
        }

        let team_ids = league_queries::team_ids_in_league(&self.pool, league_id).await?;
        let rounds = generate_rounds(&team_ids, start_date, fixtures_per_week)?;

        tracing::info!(
            "Generating schedule for league {}: {} teams, {} rounds",
            league_id,
            team_ids.len(),
            rounds.len()
        );

        let mut tx = self.pool.begin().await?;
        let mut result = Vec::with_capacity(rounds.len());
        for plan in rounds {
            let fixture = fixture_queries::insert_fixture(
                &mut *tx,
                league_id,
                season,
                plan.round,
                plan.window_start,
                plan.window_end,
            )
            .await?;

            let mut games = Vec::with_capacity(plan.pairings.len());
            for pairing in plan.pairings {
                let game = game_queries::insert_game(
                    &mut *tx,
                    fixture.id,
                    league_id,
                    season,
                    pairing.home,
                    pairing.away,
                )
                .await?;
                games.push(game);
            }
            result.push(FixtureWithGames { fixture, games });
        }
        tx.commit().await?;

        tracing::info!(
            "Schedule generation complete for league {}: {} rounds persisted",
            league_id,
            result.len()
        );
        Ok(result)
    }

    /// Persist one manually specified fixture with its games.
    pub async fn create_single_fixture(
        &self,
        league_id: Uuid,
        request: CreateFixtureRequest,
    ) -> Result<FixtureWithGames, ApiError> {
        let league = league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;
        let season = league.current_season;

        if request.round < 1 {
            return Err(ApiError::Validation("round numbers start at 1".into()));
        }
        if fixture_queries::round_exists(&self.pool, league_id, season, request.round).await? {
            return Err(ApiError::Validation(format!(
                "round {} already exists for season {}",
                request.round, season
            )));
        }

        let mut tx = self.pool.begin().await?;
        let fixture = fixture_queries::insert_fixture(
            &mut *tx,
            league_id,
            season,
            request.round,
            request.window_start,
            request.window_end,
        )
        .await?;

        let mut games = Vec::with_capacity(request.games.len());
        for pair in &request.games {
            let game = game_queries::insert_game(
                &mut *tx,
                fixture.id,
                league_id,
                season,
                pair.home_team_id,
                pair.away_team_id,
            )
            .await?;
            games.push(game);
        }
        tx.commit().await?;

        Ok(FixtureWithGames { fixture, games })
    }

    /// All fixtures of the league's current season with their games.
    pub async fn list_league_fixtures(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<FixtureWithGames>, ApiError> {
        let league = league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;

        let fixtures =
            fixture_queries::fixtures_for_league(&self.pool, league_id, league.current_season)
                .await?;
        let mut result = Vec::with_capacity(fixtures.len());
        for fixture in fixtures {
            let games = game_queries::games_for_fixture(&self.pool, fixture.id).await?;
            result.push(FixtureWithGames { fixture, games });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn teams(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn rejects_fewer_than_two_teams() {
        assert!(generate_rounds(&teams(1), start(), 1).is_err());
        assert!(generate_rounds(&[], start(), 1).is_err());
    }

    #[test]
    fn rejects_odd_team_counts() {
        assert!(generate_rounds(&teams(5), start(), 1).is_err());
    }

    #[test]
    fn every_ordered_pair_occurs_exactly_once() {
        for n in [2usize, 4, 6, 8, 10] {
            let ids = teams(n);
            let rounds = generate_rounds(&ids, start(), 1).unwrap();
            assert_eq!(rounds.len(), 2 * (n - 1));

            let mut seen = HashSet::new();
            for round in &rounds {
                assert_eq!(round.pairings.len(), n / 2);
                // Each team appears exactly once per round.
                let mut in_round = HashSet::new();
                for p in &round.pairings {
                    assert!(in_round.insert(p.home));
                    assert!(in_round.insert(p.away));
                    assert!(seen.insert((p.home, p.away)), "duplicate ordered pair");
                }
                assert_eq!(in_round.len(), n);
            }
            assert_eq!(seen.len(), n * (n - 1));
        }
    }

    #[test]
    fn reverse_half_swaps_home_and_away() {
        let ids = teams(6);
        let rounds = generate_rounds(&ids, start(), 1).unwrap();
        let half = rounds.len() / 2;
        let first: HashSet<(Uuid, Uuid)> = rounds[..half]
            .iter()
            .flat_map(|r| r.pairings.iter().map(|p| (p.home, p.away)))
            .collect();
        let second: HashSet<(Uuid, Uuid)> = rounds[half..]
            .iter()
            .flat_map(|r| r.pairings.iter().map(|p| (p.away, p.home)))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn four_team_scenario_rounds_and_dates() {
        let ids = teams(4);
        let rounds = generate_rounds(&ids, start(), 2).unwrap();
        assert_eq!(rounds.len(), 6);

        // Round 1 pairs (team0, team3) and (team1, team2).
        assert_eq!(rounds[0].pairings[0], RoundPairing { home: ids[0], away: ids[3] });
        assert_eq!(rounds[0].pairings[1], RoundPairing { home: ids[1], away: ids[2] });

        // Rounds 1-2 share the first week, 3-4 the second, 5-6 the third.
        let week0 = start();
        let week1 = start() + Duration::weeks(1);
        let week2 = start() + Duration::weeks(2);
        assert_eq!(rounds[0].window_start, week0);
        assert_eq!(rounds[1].window_start, week0);
        assert_eq!(rounds[2].window_start, week1);
        assert_eq!(rounds[3].window_start, week1);
        assert_eq!(rounds[4].window_start, week2);
        assert_eq!(rounds[5].window_start, week2);
        assert_eq!(rounds[0].window_end, week0 + Duration::days(7));
    }
}
