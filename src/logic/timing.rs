//! Kickoff time arithmetic on `HH:MM` strings.
//!
//! Times are minutes since midnight internally. There is no rollover at
//! midnight: a schedule that runs past 23:59 renders hours of 24 and up,
//! which keeps round times strictly increasing.

/// Parse a `HH:MM` string into minutes since midnight. Hours above 23 are
/// accepted while the total fits in `u32`; minutes must be below 60.
pub fn parse_hhmm(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Render minutes since midnight as zero-padded `HH:MM`.
pub fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Add minutes to a `HH:MM` time, clamping at the `u32` ceiling. `None` when
/// the input does not parse.
pub fn add_minutes(time: &str, minutes: u32) -> Option<String> {
    parse_hhmm(time).map(|t| format_hhmm(t.saturating_add(minutes)))
}

/// True when lunch is enabled and `time` falls inside `[start, end)`.
pub fn is_lunch_time(time: &str, lunch_enabled: bool, lunch_start: &str, lunch_end: &str) -> bool {
    if !lunch_enabled {
        return false;
    }
    match (parse_hhmm(time), parse_hhmm(lunch_start), parse_hhmm(lunch_end)) {
        (Some(t), Some(start), Some(end)) => t >= start && t < end,
        _ => false,
    }
}

/// `time` pushed out of the lunch window: the window end if `time` falls
/// inside it, otherwise `time` unchanged.
pub fn next_available_time(
    time: &str,
    lunch_enabled: bool,
    lunch_start: &str,
    lunch_end: &str,
) -> String {
    if is_lunch_time(time, lunch_enabled, lunch_start, lunch_end) {
        lunch_end.to_string()
    } else {
        time.to_string()
    }
}

/// Next round's kickoff in minutes: one slot after `minutes`, skipped to the
/// window end when it lands inside the (optional) lunch window.
pub fn advance_kickoff(minutes: u32, slot_minutes: u32, lunch: Option<(u32, u32)>) -> u32 {
    let next = minutes.saturating_add(slot_minutes);
    match lunch {
        Some((start, end)) if next >= start && next < end => end,
        _ => next,
    }
}
