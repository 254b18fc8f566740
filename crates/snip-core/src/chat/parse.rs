//! Free-text parsing for the booking flow

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// Parse a time-of-day from chat input.
///
/// Accepts `H`, `H:MM`, `HMM`, with an optional `am`/`pm` suffix; minutes
/// default to `00`.
#[must_use]
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim().to_lowercase();
    let re = Regex::new(r"^(\d{1,2}):?(\d{2})?\s*(am|pm)?$").expect("Invalid regex");
    let caps = re.captures(&input)?;

    let mut hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.get(3).map(|m| m.as_str()) {
        Some("pm") if hours < 12 => hours += 12,
        Some("am") if hours == 12 => hours = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Parse a calendar date from chat input.
///
/// Accepts `Y-M-D` and `M/D/Y`, with or without the `Weekday, ` prefix the
/// bot uses when listing dates.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let candidate = input.rsplit(", ").next().unwrap_or(input).trim();

    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(candidate, "%m/%d/%Y"))
        .ok()
}

#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex");
    re.is_match(input.trim())
}

/// 10-digit US phone number, with optional punctuation
#[must_use]
pub fn is_valid_phone(input: &str) -> bool {
    let re = Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").expect("Invalid regex");
    re.is_match(input.trim())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn parse_time_formats() {
        assert_eq!(parse_time("14:00"), Some(at(14, 0)));
        assert_eq!(parse_time("2pm"), Some(at(14, 0)));
        assert_eq!(parse_time("2:30 pm"), Some(at(14, 30)));
        assert_eq!(parse_time("9"), Some(at(9, 0)));
        assert_eq!(parse_time("12am"), Some(at(0, 0)));
        assert_eq!(parse_time("12pm"), Some(at(12, 0)));
        assert_eq!(parse_time("1030"), Some(at(10, 30)));
    }

    #[test]
    fn parse_time_rejects_noise() {
        assert_eq!(parse_time("sometime soon"), None);
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time(""), None);
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_date("2025-03-14"), Some(expected));
        assert_eq!(parse_date("3/14/2025"), Some(expected));
        assert_eq!(parse_date("Friday, 2025-03-14"), Some(expected));
    }

    #[test]
    fn parse_date_rejects_noise() {
        assert_eq!(parse_date("next friday-ish"), None);
        assert_eq!(parse_date("2025-13-40"), None);
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@at@signs.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("555.123.4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
    }
}
