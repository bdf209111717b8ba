//! Zone data structure: a pair of adjacent pitches and its member teams.

use crate::models::team::Team;
use serde::{Deserialize, Serialize};

/// Unique identifier for a zone (single letters: "A", "B", ...).
pub type ZoneId = String;

/// A zone: two physically adjacent pitches that host the matches of the
/// teams assigned to it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    /// Exactly two pitch numbers; fixed once the zone is built.
    pub pitches: [u32; 2],
    /// Member teams in assignment order. These are copies of roster entries.
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Zone {
    /// Create an empty zone over the given pitch pair.
    pub fn new(id: impl Into<ZoneId>, pitches: [u32; 2]) -> Self {
        Self {
            id: id.into(),
            pitches,
            teams: Vec::new(),
        }
    }

    /// True when `pitch` is one of this zone's two pitches.
    pub fn contains_pitch(&self, pitch: u32) -> bool {
        self.pitches.contains(&pitch)
    }
}
