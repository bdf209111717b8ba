//! Team-to-zone assignment.

use crate::models::{Team, TeamId, Zone, ZoneId};
use std::collections::HashMap;

/// Distribute the roster across the zones, spreading each club out.
///
/// 1. Group teams by club, clubs in roster first-appearance order.
/// 2. Sort clubs by size, largest first (stable).
/// 3. Round-robin each club's teams over the zones from a rotating global
///    offset, skipping zones already at capacity (ceil(teams/zones)).
/// 4. A team that finds no zone under capacity goes to the least-occupied
///    zone (first such zone on ties).
///
/// Fills `zones[i].teams` and returns the roster in its original order with
/// every team's home zone set.
pub fn assign_teams_to_zones(roster: &[Team], zones: &mut [Zone]) -> Vec<Team> {
    for zone in zones.iter_mut() {
        zone.teams.clear();
    }
    let num_zones = zones.len();
    if num_zones == 0 {
        return roster.to_vec();
    }
    let max_per_zone = roster.len().div_ceil(num_zones);

    let mut club_groups: Vec<(&str, Vec<&Team>)> = Vec::new();
    for team in roster {
        match club_groups.iter_mut().find(|(club, _)| *club == team.club) {
            Some((_, members)) => members.push(team),
            None => club_groups.push((&team.club, vec![team])),
        }
    }
    club_groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut assigned: HashMap<TeamId, ZoneId> = HashMap::new();
    let mut global_offset = 0;

    for (_, members) in &club_groups {
        // Each club starts from a different zone so clubs do not pile up.
        let mut cursor = global_offset;
        for team in members {
            let mut placed = false;
            for attempt in 0..num_zones {
                let candidate = (cursor + attempt) % num_zones;
                if zones[candidate].teams.len() < max_per_zone {
                    place(team, candidate, zones, &mut assigned);
                    cursor = (candidate + 1) % num_zones;
                    placed = true;
                    break;
                }
            }
            if !placed {
                // All zones at capacity: take the least-occupied one.
                if let Some(candidate) = (0..num_zones).min_by_key(|&i| zones[i].teams.len()) {
                    place(team, candidate, zones, &mut assigned);
                }
            }
        }
        global_offset = (global_offset + 1) % num_zones;
    }

    roster
        .iter()
        .map(|team| match assigned.get(&team.id) {
            Some(zone_id) => team.with_zone(zone_id.clone()),
            None => team.clone(),
        })
        .collect()
}

fn place(team: &Team, zone_index: usize, zones: &mut [Zone], assigned: &mut HashMap<TeamId, ZoneId>) {
    let zone_id = zones[zone_index].id.clone();
    zones[zone_index].teams.push(team.with_zone(zone_id.clone()));
    assigned.insert(team.id.clone(), zone_id);
}
