use uuid::Uuid;

use matchday_backend::league::team_of_week::{compute_team_of_the_week, Position};
use matchday_backend::models::game::GamePerformance;

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

/// Two performances at the same position for one player.
fn pair(position: &str, rating: f64, goals: i32, assists: i32) -> (Uuid, Vec<GamePerformance>) {
    let id = Uuid::new_v4();
    (
        id,
        vec![
            perf(id, position, rating, goals, assists),
            perf(id, position, rating, goals, assists),
        ],
    )
}

#[test]
fn fills_a_full_eleven_when_candidates_exist() {
    let mut performances = Vec::new();
    let groups: &[(&str, usize)] = &[
        ("GK", 1),
        ("CB", 3),
        ("CDM", 2),
        ("LM", 1),
        ("RM", 1),
        ("CAM", 1),
        ("ST", 2),
    ];
    for (position, count) in groups {
        for _ in 0..*count {
            performances.extend(pair(position, 7.0, 0, 0).1);
        }
    }

    let totw = compute_team_of_the_week(&performances).unwrap();
    assert_eq!(totw.lineup.len(), 11);
    assert_eq!(
        totw.lineup.iter().filter(|c| c.position == Position::Cb).count(),
        3
    );
    assert!(totw.honorable_mentions.is_empty());
}

#[test]
fn understaffed_positions_leave_slots_open() {
    // Only a keeper and one striker qualify.
    let mut performances = pair("GK", 7.5, 0, 0).1;
    performances.extend(pair("ST", 7.2, 1, 0).1);

    let totw = compute_team_of_the_week(&performances).unwrap();
    assert_eq!(totw.lineup.len(), 2);
}

#[test]
fn one_game_is_not_enough() {
    let id = Uuid::new_v4();
    let totw = compute_team_of_the_week(&[perf(id, "GK", 9.9, 0, 0)]).unwrap();
    assert!(totw.lineup.is_empty());
}

#[test]
fn games_across_positions_count_toward_the_minimum() {
    // One game at LB and one at LM: two games total, both normalize to LM,
    // the LM aggregate alone reaches the per-position minimum.
    let id = Uuid::new_v4();
    let performances = vec![perf(id, "LB", 7.0, 0, 0), perf(id, "LM", 7.0, 0, 1)];
    let totw = compute_team_of_the_week(&performances).unwrap();
    assert_eq!(totw.lineup.len(), 1);
    assert_eq!(totw.lineup[0].position, Position::Lm);
}

#[test]
fn reported_synonyms_compete_for_the_same_slot() {
    let (winger, mut performances) = pair("RW", 9.0, 1, 1);
    let (fullback, more) = pair("RB", 6.0, 0, 0);
    performances.extend(more);

    let totw = compute_team_of_the_week(&performances).unwrap();
    let right_mids: Vec<&_> = totw
        .lineup
        .iter()
        .filter(|c| c.position == Position::Rm)
        .collect();
    assert_eq!(right_mids.len(), 1);
    assert_eq!(right_mids[0].player_id, winger);
    assert_eq!(totw.honorable_mentions.len(), 1);
    assert_eq!(totw.honorable_mentions[0].player_id, fullback);
}

#[test]
fn unknown_position_is_an_error() {
    let (_, performances) = pair("LIBERO", 7.0, 0, 0);
    assert!(compute_team_of_the_week(&performances).is_err());
}

#[test]
fn a_player_occupies_at_most_one_slot() {
    let versatile = Uuid::new_v4();
    let performances = vec![
        perf(versatile, "ST", 9.9, 3, 1),
        perf(versatile, "ST", 9.9, 3, 1),
        perf(versatile, "CAM", 9.9, 2, 2),
        perf(versatile, "CAM", 9.9, 2, 2),
    ];
    let totw = compute_team_of_the_week(&performances).unwrap();
    assert_eq!(
        totw.lineup
            .iter()
            .filter(|c| c.player_id == versatile)
            .count(),
        1
    );
}
