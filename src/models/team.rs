//! Team data structure.

use crate::models::zone::ZoneId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a team (roster ids like `team-0`, `team-1`, ...).
pub type TeamId = String;

/// A team entered in the event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Club the team belongs to; teams from the same club never play each other.
    pub club: String,
    /// Home zone id, set by zone assignment. `None` for an unassigned roster entry.
    #[serde(default)]
    pub zone: Option<ZoneId>,
}

impl Team {
    /// Create an unassigned team.
    pub fn new(id: impl Into<String>, name: impl Into<String>, club: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            club: club.into(),
            zone: None,
        }
    }

    /// Copy of this team with its home zone set. Zone membership lists hold
    /// these copies; the roster entry itself is replaced, never aliased.
    pub fn with_zone(&self, zone: impl Into<ZoneId>) -> Self {
        Self {
            zone: Some(zone.into()),
            ..self.clone()
        }
    }
}
