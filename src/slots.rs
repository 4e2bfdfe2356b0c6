/// Slot label formatting and daily schedule tiling.
///
/// A slot is a fixed-duration interval on a doctor's day, identified by
/// its canonical label `"hh:mm-hh:mm"`. Labels sort lexicographically in
/// chronological order because the leading `HH:MM` is zero-padded.

use chrono::{NaiveTime, Timelike};

use crate::error::MedError;

/// Parse a `HH:MM` time into its hour and minute components.
pub fn parse_hm(text: &str) -> Result<(u32, u32), MedError> {
    let t = NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| MedError::InvalidTime {
        value: text.to_string(),
    })?;
    Ok((t.hour(), t.minute()))
}

/// Format one slot starting at `(h, m)` with the given duration.
///
/// Returns the canonical label together with the end time, which is the
/// start of the next slot. Minutes carry into the hour; the arithmetic
/// does not wrap across midnight, schedules stay within one day.
pub fn format_slot(h: u32, m: u32, duration_min: u32) -> (String, u32, u32) {
    let mut m_end = m + duration_min;
    let h_end = h + m_end / 60;
    m_end %= 60;

    let label = format!("{:02}:{:02}-{:02}:{:02}", h, m, h_end, m_end);
    (label, h_end, m_end)
}

/// Tile the interval `[start, end)` with slots of `duration_min` minutes.
///
/// Labels come out in chronological order, non-overlapping and
/// contiguous. If `end - start` is not a multiple of the duration the
/// trailing remainder is left untiled rather than overshooting.
pub fn tile_day(start: &str, end: &str, duration_min: u32) -> Result<Vec<String>, MedError> {
    let (mut h, mut m) = parse_hm(start)?;
    let (h_end, m_end) = parse_hm(end)?;

    let mut labels = Vec::new();
    while (h, m) < (h_end, m_end) {
        let (label, h_next, m_next) = format_slot(h, m, duration_min);
        if (h_next, m_next) > (h_end, m_end) {
            break;
        }
        labels.push(label);
        h = h_next;
        m = m_next;
    }

    Ok(labels)
}

/// The `HH:MM` start prefix of a slot label.
pub fn slot_start(label: &str) -> &str {
    label.split('-').next().unwrap_or(label)
}
