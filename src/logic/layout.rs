//! Pitch grid layout and zone topology.

use crate::models::{Zone, ZoneId};
use std::collections::HashMap;

/// Columns in the venue grid. Pitches snake down and up alternating columns.
pub const GRID_COLUMNS: usize = 4;

/// Map each pitch number (1-based) to its `(row, column)` cell in the venue grid.
///
/// Pitches fill column by column in a serpentine pattern: odd columns run
/// top to bottom, even columns bottom to top, so consecutive pitch numbers
/// stay physically adjacent.
pub fn pitch_grid(total_pitches: u32, columns: usize) -> HashMap<u32, (usize, usize)> {
    let mut grid = HashMap::new();
    if total_pitches == 0 || columns == 0 {
        return grid;
    }
    let per_column = (total_pitches as usize).div_ceil(columns);

    for pitch in 1..=total_pitches {
        let index = (pitch - 1) as usize;
        let col = index / per_column;
        let row = index % per_column;
        let row = if col % 2 == 0 { per_column - 1 - row } else { row };
        grid.insert(pitch, (row, col));
    }
    grid
}

/// Letter label for the zone at `index`: "A", "B", ...
fn zone_label(index: usize) -> ZoneId {
    char::from(b'A' + index as u8).to_string()
}

/// Build zones over the active pitches: one zone per consecutive pitch pair
/// (pitches 1+2, 3+4, ...). A trailing odd pitch is left out.
pub fn build_zones(total_pitches: u32) -> Vec<Zone> {
    let count = (total_pitches / 2) as usize;
    (0..count)
        .map(|k| {
            let first = (k as u32) * 2 + 1;
            Zone::new(zone_label(k), [first, first + 1])
        })
        .collect()
}

/// For every zone, the other zones sorted nearest first by Manhattan
/// distance between zone centers. A zone's center is the average of its two
/// pitch cells; pitches missing from the grid count as cell (0, 0).
///
/// Cross-zone matchmaking walks this ranking to stay local.
pub fn zone_adjacency(
    zones: &[Zone],
    grid: &HashMap<u32, (usize, usize)>,
) -> HashMap<ZoneId, Vec<ZoneId>> {
    let centers: Vec<(ZoneId, f64, f64)> = zones
        .iter()
        .map(|zone| {
            let a = grid.get(&zone.pitches[0]).copied().unwrap_or((0, 0));
            let b = grid.get(&zone.pitches[1]).copied().unwrap_or((0, 0));
            let row = (a.0 + b.0) as f64 / 2.0;
            let col = (a.1 + b.1) as f64 / 2.0;
            (zone.id.clone(), row, col)
        })
        .collect();

    let mut adjacency = HashMap::new();
    for (id, row, col) in &centers {
        let mut others: Vec<(&ZoneId, f64)> = centers
            .iter()
            .filter(|(other, _, _)| other != id)
            .map(|(other, r, c)| (other, (r - row).abs() + (c - col).abs()))
            .collect();
        others.sort_by(|a, b| a.1.total_cmp(&b.1));
        adjacency.insert(
            id.clone(),
            others.into_iter().map(|(other, _)| other.clone()).collect(),
        );
    }
    adjacency
}
