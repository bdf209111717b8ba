//! Fixture (scheduled match) and matchup key.

use crate::models::team::{Team, TeamId};
use crate::models::zone::ZoneId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a fixture (`fixture-<round index>-<pitch>`).
pub type FixtureId = String;

/// Canonical unordered pair of team ids. The two ids are stored sorted, so
/// the key for (a, b) equals the key for (b, a).
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MatchupKey(TeamId, TeamId);

impl MatchupKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

/// One scheduled match: two teams on a pitch at a kickoff time, plus the
/// referee chosen for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: FixtureId,
    /// Round number, starting at 1.
    pub round: u32,
    pub pitch: u32,
    /// Kickoff time as zero-padded `HH:MM`. Hours may exceed 23 for very
    /// long days; there is no rollover past midnight.
    pub time: String,
    pub team1: Team,
    pub team2: Team,
    /// Zone that owns the pitch (not necessarily either team's home zone).
    pub zone: ZoneId,
    /// True when the two teams come from different zones.
    pub is_cross_zone: bool,
    /// Refereeing team, if one could be found in the pitch's zone.
    #[serde(default)]
    pub referee: Option<Team>,
    /// True when the referee is also playing this round, or none was found.
    #[serde(default)]
    pub referee_conflict: bool,
}

impl Fixture {
    /// Create a fixture with no referee yet. The id is derived from the
    /// zero-based round index and the pitch number.
    pub fn new(
        round: u32,
        pitch: u32,
        time: impl Into<String>,
        team1: Team,
        team2: Team,
        zone: impl Into<ZoneId>,
        is_cross_zone: bool,
    ) -> Self {
        Self {
            id: format!("fixture-{}-{}", round - 1, pitch),
            round,
            pitch,
            time: time.into(),
            team1,
            team2,
            zone: zone.into(),
            is_cross_zone,
            referee: None,
            referee_conflict: false,
        }
    }

    /// Canonical key for the pair of teams in this fixture.
    pub fn matchup_key(&self) -> MatchupKey {
        MatchupKey::new(&self.team1.id, &self.team2.id)
    }

    /// True when the given team plays in this fixture (refereeing does not count).
    pub fn involves(&self, team_id: &str) -> bool {
        self.team1.id == team_id || self.team2.id == team_id
    }
}
