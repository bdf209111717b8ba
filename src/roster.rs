//! Roster sources: CSV upload parsing and the built-in sample roster.

use crate::models::Team;

/// Clubs used by the sample roster.
const SAMPLE_CLUBS: [&str; 8] = [
    "Rovers", "United", "Wasps", "Tigers", "Saints", "Warriors", "Chiefs", "Dragons",
];

/// Demo roster used when no teams have been uploaded: 8 clubs with 8 teams
/// each, ids `team-0` through `team-63`.
pub fn sample_roster() -> Vec<Team> {
    (0..64)
        .map(|i| {
            let club = SAMPLE_CLUBS[i / 8];
            Team::new(
                format!("team-{}", i),
                format!("{} U7 Team {}", club, i % 8 + 1),
                club,
            )
        })
        .collect()
}

/// A roster row names at most this many teams (columns 3 to 7).
const MAX_NAMES_PER_ROW: usize = 5;

/// Parse an uploaded roster CSV.
///
/// Row shape: club name, team count, then one column per team name. The
/// first row is a header and is skipped. Rows with an empty club cell and
/// blank team names are skipped; the declared count is capped at the five
/// name columns. Ids are `team-<index>` in parse order.
pub fn parse_roster_csv(text: &str) -> Result<Vec<Team>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut teams = Vec::new();
    for record in reader.records() {
        let record = record?;
        let club = match record.get(0) {
            Some(club) if !club.is_empty() => club.to_string(),
            _ => continue,
        };
        let declared: usize = record
            .get(1)
            .and_then(|count| count.parse().ok())
            .unwrap_or(0);
        for slot in 0..declared.min(MAX_NAMES_PER_ROW) {
            if let Some(name) = record.get(2 + slot) {
                if !name.is_empty() {
                    teams.push(Team::new(
                        format!("team-{}", teams.len()),
                        name,
                        club.clone(),
                    ));
                }
            }
        }
    }
    Ok(teams)
}
