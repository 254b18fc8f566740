//! Booking record model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::models::service::ServiceId;
use crate::models::stylist::StylistId;

/// A unique identifier for a booking, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Create a new unique booking ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Booking lifecycle status.
///
/// The canonical vocabulary is `pending | confirmed | cancelled`. The legacy
/// persisted vocabulary is accepted on input and mapped (`scheduled` →
/// `pending`, `completed` → `confirmed`); only canonical forms are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether this booking still holds its time slot
    #[must_use]
    pub const fn holds_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "scheduled" => Ok(Self::Pending),
            "confirmed" | "completed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(Error::InvalidInput(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

/// The sole replicated entity: one appointment held by one client.
///
/// This is the wire format exchanged between replicas; fields a foreign
/// replica sets that this implementation does not use (`price`, `duration`,
/// `notes`, ...) are carried in `extra` and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Unique identifier, immutable once created
    pub id: BookingId,
    /// Stylist taking the appointment
    pub stylist: StylistId,
    /// Booked service from the fixed catalog
    pub service: ServiceId,
    /// Plain calendar date, no time zone
    pub date: NaiveDate,
    /// Start time on the 30-minute grid
    #[serde(with = "crate::models::hhmm")]
    pub time: NaiveTime,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub status: BookingStatus,
    /// Creation timestamp, never refreshed
    pub created: DateTime<Utc>,
    /// Refreshed on every mutation; drives last-write-wins merging
    pub updated_at: DateTime<Utc>,
    /// Unknown fields from other replicas, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BookingRecord {
    /// Create a new pending booking with a fresh id
    #[must_use]
    pub fn new(
        stylist: StylistId,
        service: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        client_name: impl Into<String>,
        client_email: impl Into<String>,
        client_phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BookingId::new(),
            stylist,
            service,
            date,
            time,
            client_name: client_name.into(),
            client_email: client_email.into(),
            client_phone: client_phone.into(),
            status: BookingStatus::Pending,
            created: now,
            updated_at: now,
            extra: serde_json::Map::new(),
        }
    }

    /// Transition to a new status, refreshing `updated_at`
    pub fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_record() -> BookingRecord {
        BookingRecord::new(
            StylistId::new("natasha"),
            ServiceId::Haircut,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            "Jane Doe",
            "jane@example.com",
            "5551234567",
        )
    }

    #[test]
    fn booking_id_unique() {
        let id1 = BookingId::new();
        let id2 = BookingId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn booking_id_parse_round_trip() {
        let id = BookingId::new();
        let parsed: BookingId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn new_record_is_pending_with_matching_timestamps() {
        let record = sample_record();
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.created, record.updated_at);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn set_status_refreshes_updated_at() {
        let mut record = sample_record();
        let created = record.created;
        record.set_status(BookingStatus::Confirmed);
        assert_eq!(record.status, BookingStatus::Confirmed);
        assert!(record.updated_at >= created);
        assert_eq!(record.created, created);
    }

    #[test]
    fn status_accepts_legacy_vocabulary() {
        assert_eq!(
            "scheduled".parse::<BookingStatus>().unwrap(),
            BookingStatus::Pending
        );
        assert_eq!(
            "completed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            "Cancelled".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
        assert!("rescheduled".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn status_serializes_canonical_forms_only() {
        let json = serde_json::to_string(&BookingStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");

        let legacy: BookingStatus = serde_json::from_str("\"scheduled\"").unwrap();
        assert_eq!(serde_json::to_string(&legacy).unwrap(), "\"pending\"");
    }

    #[test]
    fn wire_format_uses_camel_case_and_hhmm_time() {
        let record = sample_record();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["stylist"], "natasha");
        assert_eq!(value["service"], "haircut");
        assert_eq!(value["date"], "2025-03-14");
        assert_eq!(value["time"], "14:00");
        assert_eq!(value["clientName"], "Jane Doe");
        assert_eq!(value["status"], "pending");
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn unknown_extra_fields_round_trip() {
        let json = r#"{
            "id": "11111111-1111-7111-8111-111111111111",
            "stylist": "justina",
            "service": "color",
            "date": "2025-04-01",
            "time": "10:30",
            "clientName": "Sam",
            "clientEmail": "sam@example.com",
            "clientPhone": "5559876543",
            "status": "scheduled",
            "created": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-02T11:30:00Z",
            "price": 120,
            "duration": 120,
            "notes": "first visit"
        }"#;

        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.extra["price"], 120);
        assert_eq!(record.extra["notes"], "first visit");

        let reserialized = serde_json::to_value(&record).unwrap();
        assert_eq!(reserialized["duration"], 120);
        assert_eq!(reserialized["time"], "10:30");

        let reparsed: BookingRecord = serde_json::from_value(reserialized).unwrap();
        assert_eq!(reparsed, record);
    }
}
