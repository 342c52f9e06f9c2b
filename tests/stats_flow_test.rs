use chrono::Utc;
use uuid::Uuid;

use matchday_backend::league::stats::PerformanceDelta;
use matchday_backend::models::stats::{PlayerSeasonStats, TeamSeasonStats};

fn fresh_team_stats() -> TeamSeasonStats {
    TeamSeasonStats {
        id: Uuid::new_v4(),
        team_id: Uuid::new_v4(),
        league_id: Some(Uuid::new_v4()),
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

fn fresh_player_stats() -> PlayerSeasonStats {
    PlayerSeasonStats {
        id: Uuid::new_v4(),
        player_id: Uuid::new_v4(),
        league_id: Some(Uuid::new_v4()),
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

fn delta(rating: f64, goals: i32, assists: i32) -> PerformanceDelta {
    PerformanceDelta {
        rating,
        goals,
        assists,
        player_of_the_match: false,
        clean_sheet: false,
    }
}

/// Correcting a score is revert-then-apply; entering the same score twice
/// must leave the record exactly as entering it once.
#[test]
fn result_correction_is_idempotent() {
    let mut once = fresh_team_stats();
    once.apply_result(2, 1);

    let mut twice = once.clone();
    twice.revert_result(2, 1);
    twice.apply_result(2, 1);

    assert_eq!(once.wins, twice.wins);
    assert_eq!(once.losses, twice.losses);
    assert_eq!(once.draws, twice.draws);
    assert_eq!(once.goals_scored, twice.goals_scored);
    assert_eq!(once.goals_conceded, twice.goals_conceded);
    assert_eq!(once.clean_sheets, twice.clean_sheets);
}

#[test]
fn result_correction_replaces_the_old_outcome() {
    let mut stats = fresh_team_stats();
    stats.apply_result(0, 1); // entered wrong: a loss
    stats.revert_result(0, 1);
    stats.apply_result(3, 1); // corrected: a win

    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 0);
    assert_eq!(stats.goals_scored, 3);
    assert_eq!(stats.goals_conceded, 1);
}

#[test]
fn performance_replacement_is_idempotent() {
    let mut stats = fresh_player_stats();
    stats.apply_performance(&delta(6.8, 0, 1));
    stats.apply_performance(&delta(7.4, 0, 0));
    stats.apply_performance(&delta(8.1, 2, 0));
    let reference = stats.clone();

    // Replace the last performance with itself.
    stats.revert_performance(&delta(8.1, 2, 0));
    stats.apply_performance(&delta(8.1, 2, 0));

    assert_eq!(stats.games, reference.games);
    assert_eq!(stats.goals, reference.goals);
    assert_eq!(stats.assists, reference.assists);
    assert!((stats.avg_rating - reference.avg_rating).abs() < 1e-9);
}

/// With one game left after the revert the rating is forced to 0, so a
/// replacement at that depth restarts the average from the replacement alone.
#[test]
fn replacement_of_the_second_game_restarts_the_average() {
    let mut stats = fresh_player_stats();
    stats.apply_performance(&delta(6.0, 0, 0));
    stats.apply_performance(&delta(8.0, 0, 0));

    stats.revert_performance(&delta(8.0, 0, 0));
    assert_eq!(stats.games, 1);
    assert_eq!(stats.avg_rating, 0.0);

    stats.apply_performance(&delta(8.0, 0, 0));
    assert_eq!(stats.games, 2);
    assert!((stats.avg_rating - 4.0).abs() < 1e-9);
}

#[test]
fn running_average_over_several_games() {
    let mut stats = fresh_player_stats();
    stats.apply_performance(&delta(6.0, 0, 0));
    stats.apply_performance(&delta(7.0, 1, 0));
    stats.apply_performance(&delta(8.0, 0, 2));

    assert_eq!(stats.games, 3);
    assert_eq!(stats.goals, 1);
    assert_eq!(stats.assists, 2);
    assert!((stats.avg_rating - 7.0).abs() < 1e-9);
}

#[test]
fn reverting_everything_returns_to_zero() {
    let mut stats = fresh_player_stats();
    let first = delta(7.5, 1, 0);
    let second = delta(6.5, 0, 1);
    stats.apply_performance(&first);
    stats.apply_performance(&second);
    stats.revert_performance(&second);
    stats.revert_performance(&first);

    assert_eq!(stats.games, 0);
    assert_eq!(stats.goals, 0);
    assert_eq!(stats.assists, 0);
    assert_eq!(stats.avg_rating, 0.0);
}
