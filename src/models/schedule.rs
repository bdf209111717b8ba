//! Schedule state: generation settings, generated output, and undo history.

use crate::models::fixture::Fixture;
use crate::models::team::Team;
use crate::models::zone::Zone;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Errors that can occur while generating a schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// No fixtures could be produced at all (too few teams or pitches, or
    /// no legal pairings under the club rule).
    NoFixtures,
    /// A configured time is not a valid zero-padded `HH:MM` string.
    InvalidTime(String),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::NoFixtures => {
                write!(f, "Failed to generate fixtures. Try adjusting the number of pitches or rounds.")
            }
            ScheduleError::InvalidTime(t) => write!(f, "Invalid time \"{}\" (expected HH:MM)", t),
        }
    }
}

/// Settings for one generation run. `teams` is the roster; when it is empty
/// a built-in sample roster is used instead.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Total pitches available on site (not all are necessarily used).
    #[serde(default = "default_num_pitches")]
    pub num_pitches: u32,
    /// Matches each team should play over the day.
    #[serde(default = "default_num_rounds")]
    pub num_rounds: u32,
    /// Minutes per match slot.
    #[serde(default = "default_match_duration")]
    pub match_duration: u32,
    /// Kickoff time of the first round, `HH:MM`.
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_lunch_enabled")]
    pub lunch_enabled: bool,
    /// Lunch window start, `HH:MM`. Rounds never kick off inside the window.
    #[serde(default = "default_lunch_start")]
    pub lunch_start: String,
    /// Lunch window end, `HH:MM` (exclusive).
    #[serde(default = "default_lunch_end")]
    pub lunch_end: String,
}

fn default_num_pitches() -> u32 {
    16
}

fn default_num_rounds() -> u32 {
    7
}

fn default_match_duration() -> u32 {
    15
}

fn default_start_time() -> String {
    "10:30".to_string()
}

fn default_lunch_enabled() -> bool {
    true
}

fn default_lunch_start() -> String {
    "11:45".to_string()
}

fn default_lunch_end() -> String {
    "12:30".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            num_pitches: default_num_pitches(),
            num_rounds: default_num_rounds(),
            match_duration: default_match_duration(),
            start_time: default_start_time(),
            lunch_enabled: default_lunch_enabled(),
            lunch_start: default_lunch_start(),
            lunch_end: default_lunch_end(),
        }
    }
}

/// Output of one generation run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub fixtures: Vec<Fixture>,
    /// Roster with home zones filled in, in original roster order.
    pub teams: Vec<Team>,
    /// Active zones with their member teams.
    pub zones: Vec<Zone>,
    /// Human-readable one-paragraph report of the run.
    pub summary: String,
}

/// A saved copy of the schedule taken just before a destructive edit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub fixtures: Vec<Fixture>,
    pub teams: Vec<Team>,
    pub zones: Vec<Zone>,
    /// RFC 3339 creation time, for display in the history list.
    pub timestamp: String,
}

impl Snapshot {
    pub fn new(fixtures: Vec<Fixture>, teams: Vec<Team>, zones: Vec<Zone>) -> Self {
        Self {
            fixtures,
            teams,
            zones,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// How many snapshots the history keeps. Older entries fall off the back.
pub const HISTORY_LIMIT: usize = 10;

/// Bounded undo history, newest snapshot first.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleHistory {
    entries: VecDeque<Snapshot>,
}

impl ScheduleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot as the newest entry, dropping the oldest past the limit.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.push_front(snapshot);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Remove and return the snapshot at `index` (0 is the newest).
    pub fn restore(&mut self, index: usize) -> Option<Snapshot> {
        self.entries.remove(index)
    }

    /// Snapshots, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
