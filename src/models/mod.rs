//! Data structures for the fixture planner: teams, zones, fixtures, schedule state.

mod fixture;
mod schedule;
mod team;
mod zone;

pub use fixture::{Fixture, FixtureId, MatchupKey};
pub use schedule::{
    GenerationConfig, Schedule, ScheduleError, ScheduleHistory, Snapshot, HISTORY_LIMIT,
};
pub use team::{Team, TeamId};
pub use zone::{Zone, ZoneId};
