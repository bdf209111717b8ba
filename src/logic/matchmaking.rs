//! Pair selection: scored search over candidate teams.

use crate::models::{Fixture, MatchupKey, Team, TeamId, ZoneId};
use std::collections::{HashMap, HashSet};

/// Everything the matchmaker knows about the day so far. Threaded explicitly
/// through generation and rebuilt from scratch for round regeneration.
#[derive(Clone, Debug, Default)]
pub struct PairingState {
    /// Matchups already scheduled; a pair never meets twice.
    pub played: HashSet<MatchupKey>,
    /// Fixtures scheduled per team so far.
    pub counts: HashMap<TeamId, u32>,
    /// Clubs each team has already faced.
    pub clubs_faced: HashMap<TeamId, HashSet<String>>,
}

impl PairingState {
    /// Fresh state for a roster: zero counts, nothing played.
    pub fn new(roster: &[Team]) -> Self {
        let mut state = Self::default();
        for team in roster {
            state.counts.insert(team.id.clone(), 0);
            state.clubs_faced.insert(team.id.clone(), HashSet::new());
        }
        state
    }

    /// State as implied by an existing fixture list (used when one round is
    /// regenerated against the rest of the schedule).
    pub fn from_fixtures(roster: &[Team], fixtures: &[Fixture]) -> Self {
        let mut state = Self::new(roster);
        for fixture in fixtures {
            state.record(&fixture.team1, &fixture.team2);
        }
        state
    }

    /// Record a scheduled matchup between the two teams.
    pub fn record(&mut self, team1: &Team, team2: &Team) {
        self.played.insert(MatchupKey::new(&team1.id, &team2.id));
        *self.counts.entry(team1.id.clone()).or_insert(0) += 1;
        *self.counts.entry(team2.id.clone()).or_insert(0) += 1;
        self.clubs_faced
            .entry(team1.id.clone())
            .or_default()
            .insert(team2.club.clone());
        self.clubs_faced
            .entry(team2.id.clone())
            .or_default()
            .insert(team1.club.clone());
    }

    /// Fixtures scheduled so far for the team.
    pub fn count(&self, team_id: &str) -> u32 {
        self.counts.get(team_id).copied().unwrap_or(0)
    }

    fn has_faced(&self, team_id: &str, club: &str) -> bool {
        self.clubs_faced
            .get(team_id)
            .map_or(false, |clubs| clubs.contains(club))
    }

    fn clubs_faced_len(&self, team_id: &str) -> usize {
        self.clubs_faced.get(team_id).map_or(0, |clubs| clubs.len())
    }
}

/// Pick the best legal pairing among `candidates`.
///
/// Hard rules: never two teams of the same club, never a repeat matchup.
/// Among legal pairs the highest-scoring one wins; on ties the pair found
/// first in candidate order wins, so results are deterministic.
///
/// Returns `None` when no legal pair exists.
pub fn find_best_match(
    candidates: &[Team],
    state: &PairingState,
    target_rounds: u32,
    adjacency: &HashMap<ZoneId, Vec<ZoneId>>,
) -> Option<(Team, Team)> {
    let mut best: Option<(usize, usize)> = None;
    let mut best_score = i64::MIN;

    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let t1 = &candidates[i];
            let t2 = &candidates[j];
            if t1.club == t2.club {
                continue;
            }
            if state.played.contains(&MatchupKey::new(&t1.id, &t2.id)) {
                continue;
            }
            let score = pair_score(t1, t2, state, target_rounds, adjacency);
            if score > best_score {
                best_score = score;
                best = Some((i, j));
            }
        }
    }

    best.map(|(i, j)| (candidates[i].clone(), candidates[j].clone()))
}

/// Soft preferences, weighted:
/// fresh club beats seen club, fewer fixtures so far beats more, narrow club
/// variety beats wide, same zone beats near zone beats far zone.
fn pair_score(
    t1: &Team,
    t2: &Team,
    state: &PairingState,
    target_rounds: u32,
    adjacency: &HashMap<ZoneId, Vec<ZoneId>>,
) -> i64 {
    let t1_seen_club = state.has_faced(&t1.id, &t2.club);
    let t2_seen_club = state.has_faced(&t2.id, &t1.club);

    let mut score: i64 = 1000;

    if !t1_seen_club && !t2_seen_club {
        score += 100;
    } else if !t1_seen_club || !t2_seen_club {
        score += 50;
    } else {
        score -= 100;
    }

    // Teams behind on their quota get priority.
    score += (i64::from(target_rounds) - i64::from(state.count(&t1.id))) * 20;
    score += (i64::from(target_rounds) - i64::from(state.count(&t2.id))) * 20;

    score += (10 - state.clubs_faced_len(&t1.id) as i64) * 5;
    score += (10 - state.clubs_faced_len(&t2.id) as i64) * 5;

    if let (Some(z1), Some(z2)) = (&t1.zone, &t2.zone) {
        if z1 == z2 {
            score += 200;
        } else if adjacency
            .get(z1)
            .map_or(false, |ranked| ranked.iter().take(2).any(|z| z == z2))
        {
            // One of the two nearest zones still keeps travel short.
            score += 50;
        }
    }

    score
}
