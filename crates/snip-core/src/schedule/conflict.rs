//! Slot conflict checking
//!
//! The check is advisory: it is only as fresh as the caller's locally
//! visible record snapshot. Two replicas that each pass this check before
//! seeing the other's write will both commit (see the store's merge rules).

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::{BookingRecord, StylistId};

/// Whether `stylist` is free for `duration_minutes` starting at `start` on
/// `date`, given the locally visible record set.
///
/// A candidate conflicts with any non-cancelled record for the same stylist
/// and date whose half-open interval `[start, end)` overlaps the candidate's.
#[must_use]
pub fn is_slot_available(
    records: &[BookingRecord],
    stylist: &StylistId,
    date: NaiveDate,
    start: NaiveTime,
    duration_minutes: u32,
) -> bool {
    let candidate_start = minutes_of(start);
    let candidate_end = candidate_start + duration_minutes;

    !records.iter().any(|record| {
        if record.stylist != *stylist || record.date != date || !record.status.holds_slot() {
            return false;
        }
        let booked_start = minutes_of(record.time);
        let booked_end = booked_start + booked_duration_minutes(record);
        candidate_start < booked_end && booked_start < candidate_end
    })
}

/// Minutes a record occupies: an explicit `duration` set by another replica
/// takes precedence over the catalog duration for its service.
fn booked_duration_minutes(record: &BookingRecord) -> u32 {
    record
        .extra
        .get("duration")
        .and_then(serde_json::Value::as_u64)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(record.service.info().duration_minutes)
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
