//! Stylist roster and weekly working-hours template

use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Stylist identifier: the lowercase name used as the replication key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StylistId(String);

impl StylistId {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Open/close bounds for one working day.
///
/// Slots are generated on the half-open span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "crate::models::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "crate::models::hhmm")]
    pub end: NaiveTime,
}

/// Static weekly template; `None` means closed that day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<WorkingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<WorkingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<WorkingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<WorkingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<WorkingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<WorkingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<WorkingHours>,
}

impl WeeklySchedule {
    #[must_use]
    pub const fn hours_on(&self, weekday: Weekday) -> Option<&WorkingHours> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    #[must_use]
    pub const fn works_on(&self, weekday: Weekday) -> bool {
        self.hours_on(weekday).is_some()
    }
}

/// A stylist taking appointments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylist {
    pub id: StylistId,
    pub name: String,
    pub schedule: WeeklySchedule,
}

/// The set of stylists bookings can be made against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    stylists: Vec<Stylist>,
}

impl Roster {
    #[must_use]
    pub const fn new(stylists: Vec<Stylist>) -> Self {
        Self { stylists }
    }

    #[must_use]
    pub fn get(&self, id: &StylistId) -> Option<&Stylist> {
        self.stylists.iter().find(|stylist| stylist.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stylist> {
        self.stylists.iter()
    }
}

impl Default for Roster {
    fn default() -> Self {
        let weekly = WeeklySchedule {
            tuesday: shift(10, 0, 16, 30),
            wednesday: shift(10, 0, 16, 30),
            thursday: shift(10, 0, 18, 30),
            friday: shift(10, 0, 18, 30),
            saturday: shift(9, 0, 15, 0),
            ..WeeklySchedule::default()
        };

        Self::new(vec![
            Stylist {
                id: StylistId::new("natasha"),
                name: "Natasha".to_string(),
                schedule: weekly.clone(),
            },
            Stylist {
                id: StylistId::new("justina"),
                name: "Justina".to_string(),
                schedule: weekly,
            },
        ])
    }
}

fn shift(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Option<WorkingHours> {
    Some(WorkingHours {
        start: NaiveTime::from_hms_opt(start_hour, start_min, 0)?,
        end: NaiveTime::from_hms_opt(end_hour, end_min, 0)?,
    })
}
