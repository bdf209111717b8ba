//! Youth tournament fixture planner: library with models and scheduling logic.

pub mod logic;
pub mod models;
pub mod roster;
pub mod storage;

pub use logic::{
    add_minutes, advance_kickoff, assign_referees, assign_teams_to_zones, build_zones,
    find_best_match, format_hhmm, generate_fixtures, is_lunch_time, next_available_time,
    parse_hhmm, pitch_grid, regenerate_round, swap_teams, zone_adjacency, PairingState,
    GRID_COLUMNS, MIN_TEAMS_PER_ZONE,
};
pub use models::{
    Fixture, FixtureId, GenerationConfig, MatchupKey, Schedule, ScheduleError, ScheduleHistory,
    Snapshot, Team, TeamId, Zone, ZoneId, HISTORY_LIMIT,
};
pub use roster::{parse_roster_csv, sample_roster};
pub use storage::{decode, encode, FileStore, RestoredSchedule, SavedSchedule, ScheduleStore};
