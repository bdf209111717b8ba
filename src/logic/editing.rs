//! Post-generation edits: regenerating one round and swapping teams by hand.

use crate::logic::generation::schedule_round;
use crate::logic::layout::{pitch_grid, zone_adjacency, GRID_COLUMNS};
use crate::logic::matchmaking::PairingState;
use crate::logic::referees::assign_referees;
use crate::models::{Fixture, Team, Zone};

/// Re-run matchmaking for one round, keeping every other round untouched.
///
/// 1. Take the round's current kickoff time (falling back to `start_time`
///    when the round has no fixtures).
/// 2. Rebuild pairing state from all other rounds, so the new pairings
///    respect matchups and quotas established outside this round.
/// 3. Schedule the round again on the same zones.
/// 4. Merge, sort by kickoff time then pitch, and re-assign referees across
///    the whole list.
///
/// Unknown round numbers fall through harmlessly: round 0 hands the list
/// back unchanged (rounds are numbered from 1), and for rounds past the end
/// nothing is removed and the round pass schedules nothing new once quotas
/// are met.
pub fn regenerate_round(
    round: u32,
    fixtures: &[Fixture],
    teams: &[Team],
    zones: &[Zone],
    target_rounds: u32,
    start_time: &str,
) -> Vec<Fixture> {
    // Rounds are numbered from 1; fixture ids carry `round - 1`.
    if round == 0 {
        return fixtures.to_vec();
    }

    let round_time = fixtures
        .iter()
        .find(|f| f.round == round)
        .map(|f| f.time.clone())
        .unwrap_or_else(|| start_time.to_string());

    let others: Vec<Fixture> = fixtures
        .iter()
        .filter(|f| f.round != round)
        .cloned()
        .collect();
    let mut state = PairingState::from_fixtures(teams, &others);

    let active_pitches = (zones.len() * 2) as u32;
    let grid = pitch_grid(active_pitches, GRID_COLUMNS);
    let adjacency = zone_adjacency(zones, &grid);

    let replacement =
        schedule_round(round, &round_time, zones, &adjacency, &mut state, target_rounds);

    let mut merged = others;
    merged.extend(replacement);
    merged.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.pitch.cmp(&b.pitch)));
    assign_referees(&mut merged, zones);
    merged
}

/// Swap a team out of one fixture for a chosen team in another fixture.
///
/// `source_slot` is 1 or 2 and names the side of the source fixture to swap
/// out; the destination side is found by `destination_team_id`. Referees are
/// left as they are: this is a manual override, the organizer owns the
/// consequences.
///
/// Returns the two exchanged teams `(source, destination)`, or `None` when
/// either fixture or the destination team cannot be found (the fixture list
/// is then untouched). Both slots must live in different fixtures.
pub fn swap_teams(
    fixtures: &mut [Fixture],
    source_fixture_id: &str,
    source_slot: u8,
    destination_fixture_id: &str,
    destination_team_id: &str,
) -> Option<(Team, Team)> {
    let source = fixtures.iter().position(|f| f.id == source_fixture_id)?;
    let destination = fixtures
        .iter()
        .position(|f| f.id == destination_fixture_id)?;
    if source == destination {
        return None;
    }

    let source_team = match source_slot {
        1 => fixtures[source].team1.clone(),
        2 => fixtures[source].team2.clone(),
        _ => return None,
    };
    let destination_slot = if fixtures[destination].team1.id == destination_team_id {
        1
    } else if fixtures[destination].team2.id == destination_team_id {
        2
    } else {
        return None;
    };
    let destination_team = match destination_slot {
        1 => fixtures[destination].team1.clone(),
        _ => fixtures[destination].team2.clone(),
    };

    match source_slot {
        1 => fixtures[source].team1 = destination_team.clone(),
        _ => fixtures[source].team2 = destination_team.clone(),
    }
    match destination_slot {
        1 => fixtures[destination].team1 = source_team.clone(),
        _ => fixtures[destination].team2 = source_team.clone(),
    }

    Some((source_team, destination_team))
}
