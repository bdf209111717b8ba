//! Scheduling engine: layout, zone assignment, matchmaking, generation,
//! kickoff timing, referees, and post-generation edits.

mod assignment;
mod editing;
mod generation;
mod layout;
mod matchmaking;
mod referees;
mod timing;

pub use assignment::assign_teams_to_zones;
pub use editing::{regenerate_round, swap_teams};
pub use generation::{generate_fixtures, MIN_TEAMS_PER_ZONE};
pub use layout::{build_zones, pitch_grid, zone_adjacency, GRID_COLUMNS};
pub use matchmaking::{find_best_match, PairingState};
pub use referees::assign_referees;
pub use timing::{
    add_minutes, advance_kickoff, format_hhmm, is_lunch_time, next_available_time, parse_hhmm,
};
