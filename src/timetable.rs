use serde::Deserialize;

use crate::models::{TimeSlot, Weekday};

// Slot as submitted by the client; duration is always recomputed
#[derive(Debug, Clone, Deserialize)]
pub struct SlotInput {
    pub day: Weekday,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
}

// Parse "HH:MM" (24-hour) into minutes since midnight.
fn parse_hhmm(hhmm: &str) -> Option<i64> {
    let (h, m) = hhmm.trim().split_once(':')?;
    let h: i64 = h.parse().ok()?;
    let m: i64 = m.parse().ok()?;
    if !(0..24).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    Some(h * 60 + m)
}

/// Validate a submitted slot and compute its duration in minutes.
pub fn build_slot(input: SlotInput) -> Result<TimeSlot, String> {
    if input.subject.trim().is_empty() {
        return Err("slot subject required".to_string());
    }
    let start = parse_hhmm(&input.start_time)
        .ok_or_else(|| format!("invalid start_time: {}", input.start_time))?;
    let end = parse_hhmm(&input.end_time)
        .ok_or_else(|| format!("invalid end_time: {}", input.end_time))?;
    if end <= start {
        return Err(format!(
            "slot must end after it starts: {}-{}",
            input.start_time, input.end_time
        ));
    }

    Ok(TimeSlot {
        day: input.day,
        subject: input.subject,
        start_time: input.start_time,
        end_time: input.end_time,
        duration: end - start,
    })
}

pub fn build_slots(inputs: Vec<SlotInput>) -> Result<Vec<TimeSlot>, String> {
    inputs.into_iter().map(build_slot).collect()
}
