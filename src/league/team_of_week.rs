use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::db::{game_queries, league_queries, player_queries};
use crate::errors::ApiError;
use crate::models::game::GamePerformance;
use crate::models::player::PlayerCard;

/// A player needs this many performances in the window to be considered at
/// all, and this many at a single position to qualify for that slot.
pub const MIN_GAMES: i32 = 2;

/// Normalized positions used for scoring and formation slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Gk,
    Cb,
    Cdm,
    Rm,
    Lm,
    Cam,
    St,
}

impl Position {
    /// Map a reported position onto its scoring group. Wing-backs and full
    /// backs score as wide midfielders; forwards collapse onto the striker
    /// group. An unrecognized position is an invariant violation, not a skip.
    pub fn normalize(raw: &str) -> Result<Position, ApiError> {
        match raw.to_uppercase().as_str() {
            "GK" => Ok(Position::Gk),
            "CB" => Ok(Position::Cb),
            "CM" | "CDM" => Ok(Position::Cdm),
            "RB" | "RW" | "RWB" | "RM" => Ok(Position::Rm),
            "LB" | "LW" | "LWB" | "LM" => Ok(Position::Lm),
            "CAM" => Ok(Position::Cam),
            "CF" | "ST" => Ok(Position::St),
            other => Err(ApiError::Invariant(format!(
                "unknown player position '{}'",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Gk => "GK",
            Position::Cb => "CB",
            Position::Cdm => "CDM",
            Position::Rm => "RM",
            Position::Lm => "LM",
            Position::Cam => "CAM",
            Position::St => "ST",
        }
    }
}

/// Formation slots in fill order: 1-3-2-1-1-1-2, eleven players.
const FORMATION: [(Position, usize); 7] = [
    (Position::Gk, 1),
    (Position::Cb, 3),
    (Position::Cdm, 2),
    (Position::Lm, 1),
    (Position::Rm, 1),
    (Position::Cam, 1),
    (Position::St, 2),
];

/// Accumulated numbers for one player at one normalized position.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PositionAggregate {
    pub games: i32,
    pub goals: i32,
    pub assists: i32,
    pub clean_sheets: i32,
    pub player_of_the_match: i32,
    pub avg_rating: f64,
}

impl PositionAggregate {
    fn absorb(&mut self, perf: &GamePerformance) {
        let games_before = self.games;
        self.goals += perf.goals;
        self.assists += perf.assists;
        if perf.clean_sheet {
            self.clean_sheets += 1;
        }
        if perf.player_of_the_match {
            self.player_of_the_match += 1;
        }
        self.avg_rating =
            (self.avg_rating * games_before as f64 + perf.rating) / (games_before + 1) as f64;
        self.games = games_before + 1;
    }
}

/// Position-weighted score from per-game rates. Defenders are paid for clean
/// sheets, attackers for goal involvement.
fn position_score(position: Position, agg: &PositionAggregate) -> f64 {
    let games = agg.games as f64;
    let goals_pg = agg.goals as f64 / games;
    let assists_pg = agg.assists as f64 / games;
    let clean = agg.clean_sheets as f64;
    let rating = agg.avg_rating;
    match position {
        Position::Gk => rating * 0.7 + clean * 0.3,
        Position::Cb => rating * 0.7 + clean * 0.3 + (goals_pg + assists_pg) * 0.2,
        Position::Cdm => rating * 0.7 + assists_pg * 0.2 + clean * 0.1 + goals_pg * 0.2,
        Position::Rm | Position::Lm => rating * 0.5 + goals_pg * 0.25 + assists_pg * 0.25,
        Position::Cam => rating * 0.4 + goals_pg * 0.2 + assists_pg * 0.4,
        Position::St => rating * 0.3 + goals_pg * 0.6 + assists_pg * 0.1,
    }
}

/// One scored (player, position) candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotwCandidate {
    pub player_id: Uuid,
    pub position: Position,
    #[serde(flatten)]
    pub aggregate: PositionAggregate,
    /// Score at this position.
    pub score: f64,
    /// Sum of this player's scores across every accumulated position; the
    /// ranking key for selection and honorable mentions.
    pub total_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamOfTheWeek {
    pub lineup: Vec<TotwCandidate>,
    pub honorable_mentions: Vec<TotwCandidate>,
}

/// Compute the team of the week from a window of completed-game performances.
///
/// The window filtering has already happened at the query; this function is
/// pure. Selection fills the fixed formation position by position, ranked by
/// total score; a player already placed is skipped in later groups, so nobody
/// occupies two slots. The top five unselected candidates become honorable
/// mentions.
pub fn compute_team_of_the_week(
    performances: &[GamePerformance],
) -> Result<TeamOfTheWeek, ApiError> {
    // Step 1: aggregate per (player, normalized position).
    let mut aggregates: HashMap<(Uuid, Position), PositionAggregate> = HashMap::new();
    for perf in performances {
        let position = Position::normalize(&perf.position)?;
        aggregates
            .entry((perf.player_id, position))
            .or_default()
            .absorb(perf);
    }

    // Minimum sample: total games summed across positions.
    let mut total_games: HashMap<Uuid, i32> = HashMap::new();
    for ((player_id, _), agg) in &aggregates {
        *total_games.entry(*player_id).or_insert(0) += agg.games;
    }
    aggregates.retain(|(player_id, _), _| total_games[player_id] >= MIN_GAMES);

    // Step 2: score each entry, then sum per player.
    let mut scored: Vec<TotwCandidate> = aggregates
        .into_iter()
        .map(|((player_id, position), aggregate)| TotwCandidate {
            player_id,
            position,
            aggregate,
            score: position_score(position, &aggregate),
            total_score: 0.0,
        })
        .collect();
    let mut player_totals: HashMap<Uuid, f64> = HashMap::new();
    for candidate in &scored {
        *player_totals.entry(candidate.player_id).or_insert(0.0) += candidate.score;
    }
    for candidate in &mut scored {
        candidate.total_score = player_totals[&candidate.player_id];
    }
    // Deterministic order regardless of hash iteration.
    scored.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    // Step 3: fill the formation, never selecting the same player twice.
    let mut selected_players: HashSet<Uuid> = HashSet::new();
    let mut lineup = Vec::with_capacity(11);
    for (position, slots) in FORMATION {
        let picks: Vec<TotwCandidate> = scored
            .iter()
            .filter(|c| {
                c.position == position
                    && c.aggregate.games >= MIN_GAMES
                    && !selected_players.contains(&c.player_id)
            })
            .take(slots)
            .cloned()
            .collect();
        for pick in picks {
            selected_players.insert(pick.player_id);
            lineup.push(pick);
        }
    }

    // Step 4: honorable mentions, best remaining entry per player.
    let mut best_remaining: HashMap<Uuid, TotwCandidate> = HashMap::new();
    for candidate in &scored {
        if selected_players.contains(&candidate.player_id) {
            continue;
        }
        match best_remaining.get(&candidate.player_id) {
            Some(existing) if existing.score >= candidate.score => {}
            _ => {
                best_remaining.insert(candidate.player_id, candidate.clone());
            }
        }
    }
    let mut honorable_mentions: Vec<TotwCandidate> = best_remaining.into_values().collect();
    honorable_mentions.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    honorable_mentions.truncate(5);

    Ok(TeamOfTheWeek { lineup, honorable_mentions })
}

/// A lineup entry enriched with names and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotwPlayer {
    #[serde(flatten)]
    pub candidate: TotwCandidate,
    pub player_name: String,
    pub player_image: Option<String>,
    pub team_name: Option<String>,
    pub team_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamOfTheWeekResponse {
    pub team_of_the_week: Vec<TotwPlayer>,
    pub honorable_mentions: Vec<TotwPlayer>,
}

/// Loads the game window, runs the engine, and attaches display data.
pub struct TeamOfWeekService {
    pool: PgPool,
}

impl TeamOfWeekService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_team_of_the_week(
        &self,
        league_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<TeamOfTheWeekResponse, ApiError> {
        league_queries::find_league(&self.pool, league_id)
            .await?
            .ok_or(ApiError::NotFound("league"))?;

        let performances =
            game_queries::performances_in_window(&self.pool, league_id, from, to).await?;
        let totw = compute_team_of_the_week(&performances)?;

        // Step 5: one batch fetch for every player we are about to show.
        let player_ids: Vec<Uuid> = totw
            .lineup
            .iter()
            .chain(totw.honorable_mentions.iter())
            .map(|c| c.player_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let cards = player_queries::player_cards(&self.pool, &player_ids).await?;
        let cards: HashMap<Uuid, PlayerCard> =
            cards.into_iter().map(|c| (c.player_id, c)).collect();

        let enrich = |candidates: Vec<TotwCandidate>| -> Result<Vec<TotwPlayer>, ApiError> {
            candidates
                .into_iter()
                .map(|candidate| {
                    let card = cards
                        .get(&candidate.player_id)
                        .ok_or(ApiError::NotFound("player"))?;
                    Ok(TotwPlayer {
                        candidate,
                        player_name: card.player_name.clone(),
                        player_image: card.player_image.clone(),
                        team_name: card.team_name.clone(),
                        team_image: card.team_image.clone(),
                    })
                })
                .collect()
        };

        Ok(TeamOfTheWeekResponse {
            team_of_the_week: enrich(totw.lineup)?,
            honorable_mentions: enrich(totw.honorable_mentions)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf(player_id: Uuid, position: &str, rating: f64, goals: i32, assists: i32) -> GamePerformance {
        GamePerformance {
            id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            player_id,
            is_home: true,
            rating,
            goals,
            assists,
            player_of_the_match: false,
            clean_sheet: false,
            position: position.to_string(),
        }
    }

    #[test]
    fn normalizes_synonyms() {
        assert_eq!(Position::normalize("CF").unwrap(), Position::St);
        assert_eq!(Position::normalize("CM").unwrap(), Position::Cdm);
        assert_eq!(Position::normalize("rwb").unwrap(), Position::Rm);
        assert_eq!(Position::normalize("LB").unwrap(), Position::Lm);
        assert!(Position::normalize("SWEEPER").is_err());
    }

    #[test]
    fn single_game_players_are_dropped() {
        let star = Uuid::new_v4();
        let totw = compute_team_of_the_week(&[perf(star, "ST", 10.0, 5, 3)]).unwrap();
        assert!(totw.lineup.is_empty());
        assert!(totw.honorable_mentions.is_empty());
    }

    #[test]
    fn striker_scoring_prefers_goals_per_game() {
        let scorer = Uuid::new_v4();
        let passer = Uuid::new_v4();
        let performances = vec![
            perf(scorer, "ST", 7.0, 2, 0),
            perf(scorer, "ST", 7.0, 2, 0),
            perf(passer, "ST", 7.0, 0, 2),
            perf(passer, "ST", 7.0, 0, 2),
        ];
        let totw = compute_team_of_the_week(&performances).unwrap();
        let strikers: Vec<Uuid> = totw
            .lineup
            .iter()
            .filter(|c| c.position == Position::St)
            .map(|c| c.player_id)
            .collect();
        assert_eq!(strikers, vec![scorer, passer]);
        // ST: rating*0.3 + goals_pg*0.6 + assists_pg*0.1
        let top = &totw.lineup.iter().find(|c| c.player_id == scorer).unwrap();
        assert!((top.score - (7.0 * 0.3 + 2.0 * 0.6)).abs() < 1e-9);
    }

    #[test]
    fn player_is_never_selected_twice() {
        // Qualifies at both CDM and CAM with dominant scores.
        let dual = Uuid::new_v4();
        let other = Uuid::new_v4();
        let performances = vec![
            perf(dual, "CDM", 9.5, 1, 1),
            perf(dual, "CDM", 9.5, 1, 1),
            perf(dual, "CAM", 9.5, 1, 1),
            perf(dual, "CAM", 9.5, 1, 1),
            perf(other, "CAM", 6.0, 0, 0),
            perf(other, "CAM", 6.0, 0, 0),
        ];
        let totw = compute_team_of_the_week(&performances).unwrap();
        let dual_slots = totw.lineup.iter().filter(|c| c.player_id == dual).count();
        assert_eq!(dual_slots, 1);
        // The freed CAM slot falls to the runner-up.
        assert!(totw
            .lineup
            .iter()
            .any(|c| c.player_id == other && c.position == Position::Cam));
    }

    #[test]
    fn formation_caps_each_position_group() {
        let performances: Vec<GamePerformance> = (0..5)
            .flat_map(|_| {
                let id = Uuid::new_v4();
                vec![perf(id, "ST", 8.0, 1, 0), perf(id, "ST", 8.0, 1, 0)]
            })
            .collect();
        let totw = compute_team_of_the_week(&performances).unwrap();
        assert_eq!(totw.lineup.len(), 2); // ST has two slots
        assert_eq!(totw.honorable_mentions.len(), 3);
    }

    #[test]
    fn total_score_sums_across_positions() {
        let roamer = Uuid::new_v4();
        let performances = vec![
            perf(roamer, "ST", 8.0, 1, 0),
            perf(roamer, "ST", 8.0, 1, 0),
            perf(roamer, "CAM", 7.0, 0, 1),
            perf(roamer, "CAM", 7.0, 0, 1),
        ];
        let totw = compute_team_of_the_week(&performances).unwrap();
        let entry = totw.lineup.iter().find(|c| c.player_id == roamer).unwrap();
        let st = 8.0 * 0.3 + 1.0 * 0.6;
        let cam = 7.0 * 0.4 + 1.0 * 0.4;
        assert!((entry.total_score - (st + cam)).abs() < 1e-9);
    }

    #[test]
    fn mentions_take_top_five_unselected() {
        // Eleven strikers: two selected, five mentioned, the rest dropped.
        let mut ids: Vec<Uuid> = (0..11).map(|_| Uuid::new_v4()).collect();
        ids.sort();
        let performances: Vec<GamePerformance> = ids
            .iter()
            .enumerate()
            .flat_map(|(i, id)| {
                let rating = 9.0 - i as f64 * 0.2;
                vec![perf(*id, "ST", rating, 0, 0), perf(*id, "ST", rating, 0, 0)]
            })
            .collect();
        let totw = compute_team_of_the_week(&performances).unwrap();
        assert_eq!(totw.lineup.len(), 2);
        assert_eq!(totw.honorable_mentions.len(), 5);
        let mention_scores: Vec<f64> =
            totw.honorable_mentions.iter().map(|c| c.total_score).collect();
        assert!(mention_scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
