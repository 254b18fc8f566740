//! Data models shared across all snip interfaces

pub mod booking;
pub mod service;
pub mod stylist;

pub use booking::{BookingId, BookingRecord, BookingStatus};
pub use service::{match_service, Service, ServiceId, CATALOG};
pub use stylist::{Roster, Stylist, StylistId, WeeklySchedule, WorkingHours};

/// Serde helper for `HH:MM` time-of-day strings on the wire.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
