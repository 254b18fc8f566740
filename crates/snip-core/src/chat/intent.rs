//! Heuristic intent classification for general inquiries
//!
//! Free text outside an active booking flow is matched against keyword sets
//! and answered with a canned or catalog-computed response. This path never
//! touches the record store.

use crate::models::{match_service, CATALOG};

/// What a general inquiry is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Booking,
    Availability,
    Pricing,
    Info,
    Other,
}

/// Classify free text into an intent by keyword heuristics
#[must_use]
pub fn classify(message: &str) -> Intent {
    let message = message.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|keyword| message.contains(keyword));

    if contains_any(&["price", "cost", "how much", "pricing"]) {
        Intent::Pricing
    } else if contains_any(&["available", "availability", "opening", "openings", "when can", "what times", "hour"]) {
        Intent::Availability
    } else if contains_any(&["book", "appointment", "schedule"]) || match_service(&message).is_some()
    {
        Intent::Booking
    } else if contains_any(&["service", "offer", "tell me about", "do you do"]) {
        Intent::Info
    } else {
        Intent::Other
    }
}

/// Answer a general inquiry with a canned or computed response
#[must_use]
pub fn respond(message: &str) -> String {
    match classify(message) {
        Intent::Pricing => format!("Here are our service prices:\n\n{}", price_lines()),
        Intent::Availability => format!(
            "Our hours of operation are:\n{OPENING_HOURS}\n\nStart a booking with a stylist to see live openings."
        ),
        Intent::Booking => format!(
            "I can help you book an appointment. Here are our services:\n\n{}\n\nWhich service would you like?",
            catalog_lines()
        ),
        Intent::Info => format!(
            "We offer the following services:\n\n{}\n\nWould you like to book an appointment?",
            catalog_lines()
        ),
        Intent::Other => {
            "I'm here to help you book an appointment. Would you like to schedule a service? \
             I can tell you about our services and prices as well."
                .to_string()
        }
    }
}

const OPENING_HOURS: &str = "Tuesday-Wednesday: 10AM-4:30PM\nThursday-Friday: 10AM-6:30PM\nSaturday: 9AM-3PM\nSunday-Monday: Closed";

/// One line per service with duration and price
pub(crate) fn catalog_lines() -> String {
    CATALOG
        .iter()
        .map(|service| {
            format!(
                "\u{2022} {} ({} mins) - ${}",
                service.name, service.duration_minutes, service.price_dollars
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn price_lines() -> String {
    CATALOG
        .iter()
        .map(|service| format!("\u{2022} {}: ${}", service.name, service.price_dollars))
        .collect::<Vec<_>>()
        .join("\n")
}
