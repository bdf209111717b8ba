//! Fixture generation: the round loop with its intra-zone and cross-zone passes.

use crate::logic::assignment::assign_teams_to_zones;
use crate::logic::layout::{build_zones, pitch_grid, zone_adjacency, GRID_COLUMNS};
use crate::logic::matchmaking::{find_best_match, PairingState};
use crate::logic::referees::assign_referees;
use crate::logic::timing::{advance_kickoff, format_hhmm, parse_hhmm};
use crate::models::{
    Fixture, GenerationConfig, Schedule, ScheduleError, Team, TeamId, Zone, ZoneId,
};
use crate::roster::sample_roster;
use std::collections::{HashMap, HashSet};

/// A zone needs at least this many teams to sustain its own matches.
pub const MIN_TEAMS_PER_ZONE: usize = 3;

/// Generate a full day of fixtures from the given settings.
///
/// 1. Size the venue: active zones = min(pitches/2, teams/3), two pitches each.
/// 2. Build zones, the pitch grid, and the zone adjacency ranking.
/// 3. Assign teams to zones, spreading clubs out.
/// 4. Round loop (capped at 3x the target in case pairings run out early):
///    stop when every team has its quota, fill each zone's own pitches from
///    its own teams, then fill leftover pitches from neighbouring zones.
///    A round that produces no fixtures ends the day.
/// 5. Assign referees over the finished list and build the summary text.
///
/// An empty roster falls back to the built-in sample roster. Returns
/// `ScheduleError::NoFixtures` when not a single fixture could be produced.
pub fn generate_fixtures(config: &GenerationConfig) -> Result<Schedule, ScheduleError> {
    let roster = if config.teams.is_empty() {
        sample_roster()
    } else {
        config.teams.clone()
    };

    let start = parse_hhmm(&config.start_time)
        .ok_or_else(|| ScheduleError::InvalidTime(config.start_time.clone()))?;
    let lunch = if config.lunch_enabled {
        let lunch_start = parse_hhmm(&config.lunch_start)
            .ok_or_else(|| ScheduleError::InvalidTime(config.lunch_start.clone()))?;
        let lunch_end = parse_hhmm(&config.lunch_end)
            .ok_or_else(|| ScheduleError::InvalidTime(config.lunch_end.clone()))?;
        Some((lunch_start, lunch_end))
    } else {
        None
    };

    let max_zones_by_pitches = (config.num_pitches / 2) as usize;
    let max_zones_by_teams = roster.len() / MIN_TEAMS_PER_ZONE;
    let active_zones = max_zones_by_pitches.min(max_zones_by_teams);
    let active_pitches = (active_zones * 2) as u32;

    let mut zones = build_zones(active_pitches);
    let grid = pitch_grid(active_pitches, GRID_COLUMNS);
    let adjacency = zone_adjacency(&zones, &grid);
    let teams = assign_teams_to_zones(&roster, &mut zones);

    let mut state = PairingState::new(&teams);
    let mut fixtures: Vec<Fixture> = Vec::new();
    let mut rounds_played: u32 = 0;
    let mut kickoff = start;

    // Safety valve: pairings can run dry before every team hits its quota.
    while rounds_played < config.num_rounds.saturating_mul(3) {
        let anyone_short = teams
            .iter()
            .any(|t| state.count(&t.id) < config.num_rounds);
        if !anyone_short {
            break;
        }

        let time = format_hhmm(kickoff);
        let round = schedule_round(
            rounds_played + 1,
            &time,
            &zones,
            &adjacency,
            &mut state,
            config.num_rounds,
        );
        if round.is_empty() {
            break;
        }

        fixtures.extend(round);
        rounds_played += 1;
        kickoff = advance_kickoff(kickoff, config.match_duration, lunch);
    }

    if fixtures.is_empty() {
        return Err(ScheduleError::NoFixtures);
    }

    assign_referees(&mut fixtures, &zones);

    let summary = build_summary(
        &fixtures,
        &teams,
        zones.len(),
        &state,
        config.num_rounds,
        rounds_played,
    );

    Ok(Schedule {
        fixtures,
        teams,
        zones,
        summary,
    })
}

/// Fill one round's pitches. First pass: every zone fills its own pitches
/// from its own teams. Second pass: pitches still empty draw candidates from
/// the owning zone plus its neighbours, nearest first.
///
/// `state` is updated with every fixture produced. Teams play at most once
/// per round and never past their quota.
pub(crate) fn schedule_round(
    round: u32,
    time: &str,
    zones: &[Zone],
    adjacency: &HashMap<ZoneId, Vec<ZoneId>>,
    state: &mut PairingState,
    target_rounds: u32,
) -> Vec<Fixture> {
    let mut round_fixtures: Vec<Fixture> = Vec::new();
    let mut used: HashSet<TeamId> = HashSet::new();
    let mut filled: HashSet<u32> = HashSet::new();

    // Intra-zone pass.
    for zone in zones {
        for &pitch in &zone.pitches {
            let available: Vec<Team> = zone
                .teams
                .iter()
                .filter(|t| !used.contains(&t.id) && state.count(&t.id) < target_rounds)
                .cloned()
                .collect();
            if available.len() < 2 {
                break;
            }
            let (team1, team2) = match find_best_match(&available, state, target_rounds, adjacency)
            {
                Some(pair) => pair,
                None => break,
            };
            state.record(&team1, &team2);
            used.insert(team1.id.clone());
            used.insert(team2.id.clone());
            filled.insert(pitch);
            round_fixtures.push(Fixture::new(
                round,
                pitch,
                time,
                team1,
                team2,
                zone.id.clone(),
                false,
            ));
        }
    }

    // Cross-zone pass over whatever pitches are still empty.
    for zone in zones {
        for &pitch in &zone.pitches {
            if filled.contains(&pitch) {
                continue;
            }
            let mut pool: Vec<Team> = Vec::new();
            let mut walk: Vec<&ZoneId> = vec![&zone.id];
            if let Some(ranked) = adjacency.get(&zone.id) {
                walk.extend(ranked.iter());
            }
            for zone_id in walk {
                if let Some(other) = zones.iter().find(|z| &z.id == zone_id) {
                    pool.extend(
                        other
                            .teams
                            .iter()
                            .filter(|t| {
                                !used.contains(&t.id) && state.count(&t.id) < target_rounds
                            })
                            .cloned(),
                    );
                }
            }
            if pool.len() < 2 {
                continue;
            }
            let (team1, team2) = match find_best_match(&pool, state, target_rounds, adjacency) {
                Some(pair) => pair,
                None => continue,
            };
            let is_cross_zone = team1.zone != team2.zone;
            state.record(&team1, &team2);
            used.insert(team1.id.clone());
            used.insert(team2.id.clone());
            filled.insert(pitch);
            round_fixtures.push(Fixture::new(
                round,
                pitch,
                time,
                team1,
                team2,
                zone.id.clone(),
                is_cross_zone,
            ));
        }
    }

    round_fixtures
}

/// One-paragraph report: volume, per-team match spread, intra/cross split,
/// referee outcome.
fn build_summary(
    fixtures: &[Fixture],
    teams: &[Team],
    zone_count: usize,
    state: &PairingState,
    target_rounds: u32,
    rounds_played: u32,
) -> String {
    let counts: Vec<u32> = teams.iter().map(|t| state.count(&t.id)).collect();
    let min_matches = counts.iter().copied().min().unwrap_or(0);
    let max_matches = counts.iter().copied().max().unwrap_or(0);
    let avg_matches = if counts.is_empty() {
        0.0
    } else {
        f64::from(counts.iter().sum::<u32>()) / counts.len() as f64
    };
    let at_target = counts.iter().filter(|&&c| c == target_rounds).count();

    let intra = fixtures.iter().filter(|f| !f.is_cross_zone).count();
    let intra_percent = if fixtures.is_empty() {
        0
    } else {
        (intra as f64 / fixtures.len() as f64 * 100.0).round() as i64
    };

    let conflicts = fixtures.iter().filter(|f| f.referee_conflict).count();
    let unassigned = fixtures.iter().filter(|f| f.referee.is_none()).count();

    format!(
        "Generated {} fixtures across {} rounds in {} zones. \
         Teams have {}-{} matches (avg: {:.1}). \
         {}/{} teams have exactly {} matches. \
         {}% intra-zone, {}% cross-zone. \
         Referees: {} clean, {} conflicts, {} unassigned.",
        fixtures.len(),
        rounds_played,
        zone_count,
        min_matches,
        max_matches,
        avg_matches,
        at_target,
        teams.len(),
        target_rounds,
        intra_percent,
        100 - intra_percent,
        fixtures.len() - conflicts,
        conflicts - unassigned,
        unassigned,
    )
}
