//! Schedule persistence: the saved-blob contract and a file-backed store.

use crate::models::{Fixture, Team, TeamId, Zone, ZoneId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A zone as persisted: membership by team id only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub pitches: [u32; 2],
    pub team_ids: Vec<TeamId>,
}

/// The persisted blob. Fixtures embed their teams in full, so the blob is
/// self-contained; zones only reference members by id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSchedule {
    pub fixtures: Vec<Fixture>,
    pub teams: Vec<Team>,
    pub zones: Vec<ZoneRecord>,
    /// RFC 3339 time the blob was written.
    pub generated_timestamp: String,
}

/// A schedule rebuilt from a saved blob.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestoredSchedule {
    pub fixtures: Vec<Fixture>,
    pub teams: Vec<Team>,
    pub zones: Vec<Zone>,
}

/// Serialize the schedule to its saved-blob JSON, stamped with the current time.
pub fn encode(fixtures: &[Fixture], teams: &[Team], zones: &[Zone]) -> serde_json::Result<String> {
    let saved = SavedSchedule {
        fixtures: fixtures.to_vec(),
        teams: teams.to_vec(),
        zones: zones
            .iter()
            .map(|zone| ZoneRecord {
                id: zone.id.clone(),
                pitches: zone.pitches,
                team_ids: zone.teams.iter().map(|t| t.id.clone()).collect(),
            })
            .collect(),
        generated_timestamp: Utc::now().to_rfc3339(),
    };
    serde_json::to_string(&saved)
}

/// Rebuild a schedule from a saved blob.
///
/// The team list is reconstructed from the teams embedded in the fixtures
/// (first appearance wins), and zone membership is rehydrated by looking up
/// each zone's team ids in that list. Ids that resolve to no team are
/// dropped. Returns `None` for malformed JSON or a blob with no fixtures.
pub fn decode(blob: &str) -> Option<RestoredSchedule> {
    let saved: SavedSchedule = serde_json::from_str(blob).ok()?;
    if saved.fixtures.is_empty() {
        return None;
    }

    let mut by_id: HashMap<TeamId, Team> = HashMap::new();
    let mut teams: Vec<Team> = Vec::new();
    for fixture in &saved.fixtures {
        for team in [&fixture.team1, &fixture.team2] {
            if !by_id.contains_key(&team.id) {
                by_id.insert(team.id.clone(), team.clone());
                teams.push(team.clone());
            }
        }
    }

    let zones = saved
        .zones
        .iter()
        .map(|record| Zone {
            id: record.id.clone(),
            pitches: record.pitches,
            teams: record
                .team_ids
                .iter()
                .filter_map(|id| by_id.get(id).cloned())
                .collect(),
        })
        .collect();

    Some(RestoredSchedule {
        fixtures: saved.fixtures,
        teams,
        zones,
    })
}

/// Key-value boundary the web shell persists schedules through.
pub trait ScheduleStore: Send + Sync {
    /// The blob stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `blob` under `key`. False when the write failed.
    fn set(&self, key: &str, blob: &str) -> bool;
}

/// One JSON file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keys map to file names; anything outside `[A-Za-z0-9_-]` becomes `_`
    /// so a key can never escape the data directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl ScheduleStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, blob: &str) -> bool {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            log::error!("failed to create data dir {}: {}", self.dir.display(), e);
            return false;
        }
        let path = self.path_for(key);
        match fs::write(&path, blob) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to write {}: {}", path.display(), e);
                false
            }
        }
    }
}
