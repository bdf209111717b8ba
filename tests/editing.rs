//! Integration tests for post-generation edits: single-round regeneration,
//! manual team swaps, and the undo history.

use fixture_planner::{
    generate_fixtures, regenerate_round, swap_teams, GenerationConfig, Schedule, ScheduleHistory,
    Snapshot, Team,
};
use std::collections::HashSet;

fn roster(clubs: &[(&str, usize)]) -> Vec<Team> {
    let mut teams = Vec::new();
    for (club, count) in clubs {
        for i in 0..*count {
            teams.push(Team::new(
                format!("team-{}", teams.len()),
                format!("{} U8 Team {}", club, i + 1),
                *club,
            ));
        }
    }
    teams
}

fn base_schedule() -> Schedule {
    let teams = roster(&[("Rovers", 2), ("United", 2), ("Wasps", 2), ("Tigers", 2)]);
    let cfg = GenerationConfig {
        teams,
        num_pitches: 4,
        num_rounds: 3,
        lunch_enabled: false,
        ..GenerationConfig::default()
    };
    generate_fixtures(&cfg).unwrap()
}

/// Pairing-level view of a fixture, ignoring referee fields.
fn pairing(f: &fixture_planner::Fixture) -> (String, String, String, String, u32) {
    (
        f.id.clone(),
        f.team1.id.clone(),
        f.team2.id.clone(),
        f.time.clone(),
        f.pitch,
    )
}

#[test]
fn regenerating_one_round_leaves_other_rounds_pairings_alone() {
    let schedule = base_schedule();
    let merged = regenerate_round(2, &schedule.fixtures, &schedule.teams, &schedule.zones, 3, "10:30");

    let others_before: Vec<_> = schedule
        .fixtures
        .iter()
        .filter(|f| f.round != 2)
        .map(pairing)
        .collect();
    let others_after: Vec<_> = merged
        .iter()
        .filter(|f| f.round != 2)
        .map(pairing)
        .collect();
    assert_eq!(others_before, others_after);
}

#[test]
fn regenerated_round_respects_matchups_played_elsewhere() {
    let schedule = base_schedule();
    let merged = regenerate_round(2, &schedule.fixtures, &schedule.teams, &schedule.zones, 3, "10:30");

    let mut seen = HashSet::new();
    for fixture in &merged {
        assert!(seen.insert(fixture.matchup_key()), "repeat matchup {}", fixture.id);
        assert_ne!(fixture.team1.club, fixture.team2.club);
    }
    for team in &schedule.teams {
        let played = merged.iter().filter(|f| f.involves(&team.id)).count();
        assert!(played <= 3);
    }
    // A team appears at most once inside the regenerated round.
    let mut in_round = HashSet::new();
    for fixture in merged.iter().filter(|f| f.round == 2) {
        assert!(in_round.insert(fixture.team1.id.clone()));
        assert!(in_round.insert(fixture.team2.id.clone()));
    }
}

#[test]
fn regenerated_round_keeps_its_kickoff_time() {
    let schedule = base_schedule();
    let before: HashSet<String> = schedule
        .fixtures
        .iter()
        .filter(|f| f.round == 2)
        .map(|f| f.time.clone())
        .collect();
    let merged = regenerate_round(2, &schedule.fixtures, &schedule.teams, &schedule.zones, 3, "10:30");
    let after: HashSet<String> = merged
        .iter()
        .filter(|f| f.round == 2)
        .map(|f| f.time.clone())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn regenerating_twice_gives_the_same_round_again() {
    let schedule = base_schedule();
    let first = regenerate_round(2, &schedule.fixtures, &schedule.teams, &schedule.zones, 3, "10:30");
    let second = regenerate_round(2, &first, &schedule.teams, &schedule.zones, 3, "10:30");
    assert_eq!(first, second);
}

#[test]
fn regenerating_an_unknown_round_changes_nothing() {
    let schedule = base_schedule();
    let merged = regenerate_round(999, &schedule.fixtures, &schedule.teams, &schedule.zones, 3, "10:30");
    assert_eq!(merged, schedule.fixtures);
}

#[test]
fn regenerating_round_zero_changes_nothing() {
    // Fourteen single-team clubs on two pitches with a one-round target: the
    // round cap ends generation while two teams still sit under quota, so a
    // round-0 pass would have an eligible pair left over. Rounds are numbered
    // from 1; round 0 must hand the schedule back untouched.
    let teams: Vec<Team> = (0..14)
        .map(|i| {
            Team::new(
                format!("team-{}", i),
                format!("Solo U8 Team {}", i + 1),
                format!("Club {}", i),
            )
        })
        .collect();
    let cfg = GenerationConfig {
        teams,
        num_pitches: 2,
        num_rounds: 1,
        lunch_enabled: false,
        ..GenerationConfig::default()
    };
    let schedule = generate_fixtures(&cfg).unwrap();

    let unplayed = schedule
        .teams
        .iter()
        .filter(|t| !schedule.fixtures.iter().any(|f| f.involves(&t.id)))
        .count();
    assert_eq!(unplayed, 2);

    let merged = regenerate_round(0, &schedule.fixtures, &schedule.teams, &schedule.zones, 1, "10:30");
    assert_eq!(merged, schedule.fixtures);
}

#[test]
fn swap_exchanges_the_two_teams_and_nothing_else() {
    let schedule = base_schedule();
    let mut fixtures = schedule.fixtures.clone();
    let source_id = fixtures[0].id.clone();
    let destination_id = fixtures[1].id.clone();
    let x = fixtures[0].team1.clone();
    let y = fixtures[1].team1.clone();

    let swapped = swap_teams(&mut fixtures, &source_id, 1, &destination_id, &y.id);

    let (out, in_) = swapped.unwrap();
    assert_eq!(out.id, x.id);
    assert_eq!(in_.id, y.id);
    assert_eq!(fixtures[0].team1.id, y.id);
    assert_eq!(fixtures[1].team1.id, x.id);
    // Everything else is untouched, including the second slots and referees.
    assert_eq!(fixtures[0].team2, schedule.fixtures[0].team2);
    assert_eq!(fixtures[1].team2, schedule.fixtures[1].team2);
    assert_eq!(fixtures[0].referee, schedule.fixtures[0].referee);
    assert_eq!(fixtures[1].referee, schedule.fixtures[1].referee);
    assert_eq!(fixtures[2..], schedule.fixtures[2..]);
}

#[test]
fn swap_works_on_the_second_slot_too() {
    let schedule = base_schedule();
    let mut fixtures = schedule.fixtures.clone();
    let source_id = fixtures[0].id.clone();
    let destination_id = fixtures[1].id.clone();
    let x = fixtures[0].team2.clone();
    let y = fixtures[1].team2.clone();

    let swapped = swap_teams(&mut fixtures, &source_id, 2, &destination_id, &y.id);

    assert!(swapped.is_some());
    assert_eq!(fixtures[0].team2.id, y.id);
    assert_eq!(fixtures[1].team2.id, x.id);
}

#[test]
fn swap_with_unknown_ids_or_slots_is_a_silent_noop() {
    let schedule = base_schedule();
    let mut fixtures = schedule.fixtures.clone();
    let f0 = fixtures[0].id.clone();
    let f1 = fixtures[1].id.clone();
    let y = fixtures[1].team1.id.clone();

    assert!(swap_teams(&mut fixtures, "fixture-99-99", 1, &f1, &y).is_none());
    assert!(swap_teams(&mut fixtures, &f0, 1, "fixture-99-99", &y).is_none());
    assert!(swap_teams(&mut fixtures, &f0, 3, &f1, &y).is_none());
    assert!(swap_teams(&mut fixtures, &f0, 1, &f1, "team-999").is_none());
    // Both slots in the same fixture is not a swap.
    let own_team2 = fixtures[0].team2.id.clone();
    assert!(swap_teams(&mut fixtures, &f0, 1, &f0, &own_team2).is_none());

    assert_eq!(fixtures, schedule.fixtures);
}

fn marker_snapshot(tag: usize) -> Snapshot {
    Snapshot::new(
        Vec::new(),
        vec![Team::new(format!("team-{}", tag), "marker", "Club")],
        Vec::new(),
    )
}

#[test]
fn history_keeps_the_ten_newest_snapshots() {
    let mut history = ScheduleHistory::new();
    for tag in 0..12 {
        history.record(marker_snapshot(tag));
    }

    assert_eq!(history.len(), 10);
    let ids: Vec<&str> = history.iter().map(|s| s.teams[0].id.as_str()).collect();
    assert_eq!(ids[0], "team-11");
    assert_eq!(ids[9], "team-2");
}

#[test]
fn restore_hands_back_and_removes_the_chosen_snapshot() {
    let mut history = ScheduleHistory::new();
    for tag in 0..3 {
        history.record(marker_snapshot(tag));
    }

    // Newest first: [2, 1, 0]. Index 1 is the middle snapshot.
    let snapshot = history.restore(1).unwrap();
    assert_eq!(snapshot.teams[0].id, "team-1");
    assert_eq!(history.len(), 2);
    let ids: Vec<&str> = history.iter().map(|s| s.teams[0].id.as_str()).collect();
    assert_eq!(ids, ["team-2", "team-0"]);

    assert!(history.restore(5).is_none());
}

#[test]
fn snapshots_carry_a_timestamp() {
    let snapshot = marker_snapshot(0);
    assert!(!snapshot.timestamp.is_empty());
}
