//! Availability generation and slot conflict checking

pub mod availability;
pub mod conflict;

pub use availability::{open_times, upcoming_working_days};
pub use conflict::is_slot_available;
