//! Availability generation from the weekly working-hours template

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::models::{BookingRecord, Stylist};
use crate::schedule::conflict::is_slot_available;

/// Open start times for `stylist` on `date`, on a `grid_minutes` grid.
///
/// Candidates walk the half-open template span `[start, end)` and every
/// candidate that fails the conflict check against the visible record set is
/// removed. Non-working days produce an empty sequence.
#[must_use]
pub fn open_times(
    records: &[BookingRecord],
    stylist: &Stylist,
    date: NaiveDate,
    grid_minutes: u32,
) -> Vec<NaiveTime> {
    if grid_minutes == 0 {
        return Vec::new();
    }
    let Some(hours) = stylist.schedule.hours_on(date.weekday()) else {
        return Vec::new();
    };

    let mut times = Vec::new();
    let end = minutes_of(hours.end);
    let mut current = minutes_of(hours.start);

    while current < end {
        if let Some(time) = time_from_minutes(current) {
            if is_slot_available(records, &stylist.id, date, time, grid_minutes) {
                times.push(time);
            }
        }
        current += grid_minutes;
    }

    times
}

/// The next `lookahead_days` calendar days (starting today) on which the
/// stylist works.
#[must_use]
pub fn upcoming_working_days(
    stylist: &Stylist,
    today: NaiveDate,
    lookahead_days: u32,
) -> Vec<NaiveDate> {
    (0..u64::from(lookahead_days))
        .filter_map(|offset| today.checked_add_days(chrono::Days::new(offset)))
        .filter(|date| stylist.schedule.works_on(date.weekday()))
        .collect()
}

fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}
