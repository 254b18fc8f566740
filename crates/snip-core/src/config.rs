//! Scheduling configuration
//!
//! Slot granularity and booking look-ahead are configuration, not derived
//! data: the chat flow offers hourly starts while the dashboard and booking
//! form work on the 30-minute grid.

use serde::{Deserialize, Serialize};

/// Tunables for availability generation and the chat flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Grid step offered by the chat flow, in minutes
    pub chat_slot_minutes: u32,
    /// Grid step used by the dashboard and availability queries, in minutes
    pub grid_slot_minutes: u32,
    /// How many calendar days ahead the chat flow offers dates
    pub lookahead_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            chat_slot_minutes: 60,
            grid_slot_minutes: 30,
            lookahead_days: 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_site_behavior() {
        let config = ScheduleConfig::default();
        assert_eq!(config.chat_slot_minutes, 60);
        assert_eq!(config.grid_slot_minutes, 30);
        assert_eq!(config.lookahead_days, 14);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ScheduleConfig = serde_json::from_str(r#"{"chat_slot_minutes": 30}"#).unwrap();
        assert_eq!(config.chat_slot_minutes, 30);
        assert_eq!(config.grid_slot_minutes, 30);
        assert_eq!(config.lookahead_days, 14);
    }
}
