use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use matchday_backend::league::schedule::generate_rounds;

fn teams(n: usize) -> Vec<Uuid> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn start() -> DateTime<Utc> {
    "2026-03-02T18:00:00Z".parse().unwrap()
}

#[test]
fn four_teams_two_rounds_per_week() {
    let ids = teams(4);
    let rounds = generate_rounds(&ids, start(), 2).unwrap();

    // 2 * (4 - 1) rounds, numbered from 1.
    assert_eq!(rounds.len(), 6);
    assert_eq!(rounds[0].round, 1);
    assert_eq!(rounds[5].round, 6);

    // Two games per round, every team plays exactly once.
    for round in &rounds {
        assert_eq!(round.pairings.len(), 2);
        let mut seen = HashSet::new();
        for pairing in &round.pairings {
            assert!(seen.insert(pairing.home));
            assert!(seen.insert(pairing.away));
        }
        assert_eq!(seen.len(), 4);
    }

    // Rounds land in weekly windows, two at a time.
    assert_eq!(rounds[0].window_start, start());
    assert_eq!(rounds[1].window_start, start());
    assert_eq!(rounds[2].window_start, start() + Duration::weeks(1));
    assert_eq!(rounds[3].window_start, start() + Duration::weeks(1));
    assert_eq!(rounds[4].window_start, start() + Duration::weeks(2));
    assert_eq!(rounds[5].window_start, start() + Duration::weeks(2));
    assert_eq!(rounds[0].window_end, start() + Duration::days(7));
}

#[test]
fn every_team_hosts_every_other_exactly_once() {
    for n in [2usize, 4, 6, 8, 12] {
        let ids = teams(n);
        let rounds = generate_rounds(&ids, start(), 1).unwrap();
        assert_eq!(rounds.len(), 2 * (n - 1));

        let mut hosted: HashSet<(Uuid, Uuid)> = HashSet::new();
        for round in &rounds {
            for pairing in &round.pairings {
                assert_ne!(pairing.home, pairing.away);
                assert!(
                    hosted.insert((pairing.home, pairing.away)),
                    "duplicate pairing with {} teams",
                    n
                );
            }
        }
        // A full double round-robin: n * (n - 1) ordered pairs.
        assert_eq!(hosted.len(), n * (n - 1));
    }
}

#[test]
fn second_half_mirrors_the_first() {
    let ids = teams(6);
    let rounds = generate_rounds(&ids, start(), 1).unwrap();
    let half = rounds.len() / 2;
    for i in 0..half {
        let first: HashSet<(Uuid, Uuid)> = rounds[i]
            .pairings
            .iter()
            .map(|p| (p.home, p.away))
            .collect();
        let mirrored: HashSet<(Uuid, Uuid)> = rounds[half + i]
            .pairings
            .iter()
            .map(|p| (p.away, p.home))
            .collect();
        assert_eq!(first, mirrored);
    }
}

#[test]
fn rejects_degenerate_inputs() {
    assert!(generate_rounds(&teams(0), start(), 1).is_err());
    assert!(generate_rounds(&teams(1), start(), 1).is_err());
    assert!(generate_rounds(&teams(5), start(), 1).is_err());
    assert!(generate_rounds(&teams(4), start(), 0).is_err());
}
