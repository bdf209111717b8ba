//! Referee assignment over a finished fixture list.

use crate::models::{Fixture, Team, TeamId, Zone};
use std::collections::{HashMap, HashSet};

/// Give every fixture a refereeing team from the zone that owns its pitch.
///
/// Per round: teams already playing are only used as a last resort, a team
/// referees at most one match per round, and across the day the least-used
/// team is always picked first. Fixtures in zones with the fewest spare
/// teams choose first so the tight zones are not left empty-handed.
///
/// A fixture is flagged with `referee_conflict` when its referee also plays
/// that round or no referee could be found at all.
pub fn assign_referees(fixtures: &mut [Fixture], zones: &[Zone]) {
    let mut pitch_to_zone: HashMap<u32, usize> = HashMap::new();
    for (index, zone) in zones.iter().enumerate() {
        for &pitch in &zone.pitches {
            pitch_to_zone.insert(pitch, index);
        }
    }

    // Duty counts persist across rounds so the load spreads over the day.
    let mut duty_counts: HashMap<TeamId, u32> = HashMap::new();
    for zone in zones {
        for team in &zone.teams {
            duty_counts.insert(team.id.clone(), 0);
        }
    }

    let mut rounds: Vec<u32> = fixtures.iter().map(|f| f.round).collect();
    rounds.sort_unstable();
    rounds.dedup();

    for round in rounds {
        let round_indexes: Vec<usize> = (0..fixtures.len())
            .filter(|&i| fixtures[i].round == round)
            .collect();

        let mut playing: HashSet<TeamId> = HashSet::new();
        for &i in &round_indexes {
            playing.insert(fixtures[i].team1.id.clone());
            playing.insert(fixtures[i].team2.id.clone());
        }

        // Scarcest zone picks first.
        let mut ordered = round_indexes;
        ordered.sort_by_key(|&i| spare_team_count(&fixtures[i], zones, &pitch_to_zone));

        let mut assigned_this_round: HashSet<TeamId> = HashSet::new();

        for &i in &ordered {
            let zone = match pitch_to_zone.get(&fixtures[i].pitch) {
                Some(&index) => &zones[index],
                None => {
                    fixtures[i].referee = None;
                    fixtures[i].referee_conflict = true;
                    continue;
                }
            };

            let home1 = fixtures[i].team1.id.clone();
            let home2 = fixtures[i].team2.id.clone();
            let candidates: Vec<&Team> = zone
                .teams
                .iter()
                .filter(|t| t.id != home1 && t.id != home2 && !assigned_this_round.contains(&t.id))
                .collect();
            let (idle, busy): (Vec<&Team>, Vec<&Team>) = candidates
                .into_iter()
                .partition(|t| !playing.contains(&t.id));

            let (pick, conflict) = if idle.is_empty() {
                (least_used(&busy, &duty_counts), true)
            } else {
                (least_used(&idle, &duty_counts), false)
            };

            match pick {
                Some(referee) => {
                    *duty_counts.entry(referee.id.clone()).or_insert(0) += 1;
                    assigned_this_round.insert(referee.id.clone());
                    fixtures[i].referee = Some(referee.clone());
                    fixtures[i].referee_conflict = conflict;
                }
                None => {
                    fixtures[i].referee = None;
                    fixtures[i].referee_conflict = true;
                }
            }
        }
    }
}

/// Teams in the pitch's zone not playing in this fixture. Zero for a pitch
/// no zone owns.
fn spare_team_count(
    fixture: &Fixture,
    zones: &[Zone],
    pitch_to_zone: &HashMap<u32, usize>,
) -> usize {
    match pitch_to_zone.get(&fixture.pitch) {
        Some(&index) => zones[index]
            .teams
            .iter()
            .filter(|t| t.id != fixture.team1.id && t.id != fixture.team2.id)
            .count(),
        None => 0,
    }
}

/// Least-used team in the pool; ties keep zone membership order.
fn least_used<'a>(pool: &[&'a Team], duty_counts: &HashMap<TeamId, u32>) -> Option<&'a Team> {
    pool.iter()
        .copied()
        .min_by_key(|t| duty_counts.get(&t.id).copied().unwrap_or(0))
}
