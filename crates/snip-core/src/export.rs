//! Booking export rendering

use crate::error::Result;
use crate::models::BookingRecord;

/// Render bookings as pretty-printed JSON in the replica wire format
pub fn render_json_export(records: &[BookingRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::{BookingRecord, ServiceId, StylistId};

    use super::*;

    #[test]
    fn export_uses_wire_field_names() {
        let record = BookingRecord::new(
            StylistId::new("justina"),
            ServiceId::Color,
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            "Sam",
            "sam@example.com",
            "5559876543",
        );

        let rendered = render_json_export(&[record]).unwrap();
        assert!(rendered.contains("\"clientName\": \"Sam\""));
        assert!(rendered.contains("\"time\": \"10:30\""));
        assert!(rendered.contains("\"status\": \"pending\""));
    }

    #[test]
    fn empty_export_is_an_empty_list() {
        assert_eq!(render_json_export(&[]).unwrap(), "[]");
    }
}
