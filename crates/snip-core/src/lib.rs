//! snip-core - Core library for snip
//!
//! This crate contains the shared models, the replicated booking store, the
//! scheduling logic, and the chat booking flow used by all snip interfaces.

pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod models;
pub mod schedule;
pub mod store;

pub use error::{Error, Result};
pub use models::{BookingId, BookingRecord, BookingStatus};
