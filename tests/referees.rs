//! Integration tests for referee assignment on hand-built fixture lists.

use fixture_planner::{assign_referees, Fixture, Team, Zone};

fn team(id: &str, club: &str, zone: &str) -> Team {
    Team::new(id, format!("{} squad", id), club).with_zone(zone)
}

fn zone(id: &str, pitches: [u32; 2], teams: Vec<Team>) -> Zone {
    let mut zone = Zone::new(id, pitches);
    zone.teams = teams;
    zone
}

fn fixture(round: u32, pitch: u32, team1: &Team, team2: &Team, zone: &str) -> Fixture {
    Fixture::new(round, pitch, "10:00", team1.clone(), team2.clone(), zone, false)
}

#[test]
fn the_spare_team_referees_without_conflict() {
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let t3 = team("t3", "Wasps", "A");
    let zones = vec![zone("A", [1, 2], vec![t1.clone(), t2.clone(), t3.clone()])];
    let mut fixtures = vec![fixture(1, 1, &t1, &t2, "A")];

    assign_referees(&mut fixtures, &zones);

    assert_eq!(fixtures[0].referee.as_ref().map(|t| t.id.as_str()), Some("t3"));
    assert!(!fixtures[0].referee_conflict);
}

#[test]
fn a_playing_team_is_the_fallback_and_flags_a_conflict() {
    // Four teams, both pitches busy: every candidate referee is playing.
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let t3 = team("t3", "Wasps", "A");
    let t4 = team("t4", "Tigers", "A");
    let zones = vec![zone(
        "A",
        [1, 2],
        vec![t1.clone(), t2.clone(), t3.clone(), t4.clone()],
    )];
    let mut fixtures = vec![fixture(1, 1, &t1, &t2, "A"), fixture(1, 2, &t3, &t4, "A")];

    assign_referees(&mut fixtures, &zones);

    assert_eq!(fixtures[0].referee.as_ref().map(|t| t.id.as_str()), Some("t3"));
    assert!(fixtures[0].referee_conflict);
    assert_eq!(fixtures[1].referee.as_ref().map(|t| t.id.as_str()), Some("t1"));
    assert!(fixtures[1].referee_conflict);
}

#[test]
fn no_spare_team_at_all_leaves_the_fixture_unassigned() {
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let zones = vec![zone("A", [1, 2], vec![t1.clone(), t2.clone()])];
    let mut fixtures = vec![fixture(1, 1, &t1, &t2, "A")];

    assign_referees(&mut fixtures, &zones);

    assert!(fixtures[0].referee.is_none());
    assert!(fixtures[0].referee_conflict);
}

#[test]
fn a_team_referees_at_most_once_per_round() {
    // Five teams: t5 is the only idle team but may take only one of the two
    // fixtures; the other falls back to a playing team.
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let t3 = team("t3", "Wasps", "A");
    let t4 = team("t4", "Tigers", "A");
    let t5 = team("t5", "Saints", "A");
    let zones = vec![zone(
        "A",
        [1, 2],
        vec![t1.clone(), t2.clone(), t3.clone(), t4.clone(), t5.clone()],
    )];
    let mut fixtures = vec![fixture(1, 1, &t1, &t2, "A"), fixture(1, 2, &t3, &t4, "A")];

    assign_referees(&mut fixtures, &zones);

    assert_eq!(fixtures[0].referee.as_ref().map(|t| t.id.as_str()), Some("t5"));
    assert!(!fixtures[0].referee_conflict);
    assert_eq!(fixtures[1].referee.as_ref().map(|t| t.id.as_str()), Some("t1"));
    assert!(fixtures[1].referee_conflict);
}

#[test]
fn duty_rotates_to_the_least_used_team_across_rounds() {
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let t3 = team("t3", "Wasps", "A");
    let t4 = team("t4", "Tigers", "A");
    let zones = vec![zone(
        "A",
        [1, 2],
        vec![t1.clone(), t2.clone(), t3.clone(), t4.clone()],
    )];
    let mut fixtures = vec![fixture(1, 1, &t1, &t2, "A"), fixture(2, 1, &t1, &t2, "A")];

    assign_referees(&mut fixtures, &zones);

    // Round 1 takes t3 (first spare); round 2 prefers t4, now the least used.
    assert_eq!(fixtures[0].referee.as_ref().map(|t| t.id.as_str()), Some("t3"));
    assert_eq!(fixtures[1].referee.as_ref().map(|t| t.id.as_str()), Some("t4"));
}

#[test]
fn the_tightest_fixture_picks_its_referee_first() {
    // Pitch 1 hosts two visiting teams, pitch 2 two home teams. The home
    // fixture has only one spare candidate (t3), so it must choose before
    // the visiting fixture sweeps t3 up.
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let t3 = team("t3", "Wasps", "A");
    let u1 = team("u1", "Saints", "B");
    let u2 = team("u2", "Tigers", "B");
    let zones = vec![zone("A", [1, 2], vec![t1.clone(), t2.clone(), t3.clone()])];
    let mut fixtures = vec![fixture(1, 1, &u1, &u2, "A"), fixture(1, 2, &t1, &t2, "A")];

    assign_referees(&mut fixtures, &zones);

    let visiting = fixtures.iter().find(|f| f.pitch == 1).unwrap();
    let home = fixtures.iter().find(|f| f.pitch == 2).unwrap();
    assert_eq!(home.referee.as_ref().map(|t| t.id.as_str()), Some("t3"));
    assert!(!home.referee_conflict);
    assert_eq!(visiting.referee.as_ref().map(|t| t.id.as_str()), Some("t1"));
    assert!(visiting.referee_conflict);
}

#[test]
fn a_pitch_no_zone_owns_gets_no_referee() {
    let t1 = team("t1", "Rovers", "A");
    let t2 = team("t2", "United", "A");
    let t3 = team("t3", "Wasps", "A");
    let zones = vec![zone("A", [1, 2], vec![t1.clone(), t2.clone(), t3.clone()])];
    let mut fixtures = vec![fixture(1, 9, &t1, &t2, "A")];

    assign_referees(&mut fixtures, &zones);

    assert!(fixtures[0].referee.is_none());
    assert!(fixtures[0].referee_conflict);
}
