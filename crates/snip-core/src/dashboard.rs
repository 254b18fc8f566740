//! Admin dashboard projection
//!
//! A read-only materialized view over the record store. The mirror is built
//! purely from the subscription stream; status actions write back through
//! `put` and rely on the same stream to refresh the view.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{BookingId, BookingRecord, BookingStatus};
use crate::store::BookingStore;

/// Headline counters, recomputed from scratch on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    /// Bookings dated today, any status
    pub today: usize,
    /// Bookings awaiting confirmation, any date
    pub pending: usize,
}

/// Materialized admin view of the booking set
pub struct Dashboard {
    store: Arc<BookingStore>,
    mirror: Arc<Mutex<BTreeMap<String, BookingRecord>>>,
}

impl Dashboard {
    /// Subscribe a new projection to the store; existing records are
    /// mirrored immediately
    #[must_use]
    pub fn new(store: Arc<BookingStore>) -> Self {
        let mirror = Arc::new(Mutex::new(BTreeMap::new()));
        let sink = Arc::clone(&mirror);
        store.subscribe(move |record: &BookingRecord| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(record.id.as_str(), record.clone());
        });

        Self { store, mirror }
    }

    #[must_use]
    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        let mirror = self.lock();
        DashboardStats {
            today: mirror.values().filter(|record| record.date == today).count(),
            pending: mirror
                .values()
                .filter(|record| record.status == BookingStatus::Pending)
                .count(),
        }
    }

    /// The given day's bookings, sorted by start time
    #[must_use]
    pub fn day_grid(&self, date: NaiveDate) -> Vec<BookingRecord> {
        let mut day: Vec<BookingRecord> = self
            .lock()
            .values()
            .filter(|record| record.date == date)
            .cloned()
            .collect();
        day.sort_by_key(|record| record.time);
        day
    }

    /// The 5 most recently created bookings across all dates
    #[must_use]
    pub fn recent(&self) -> Vec<BookingRecord> {
        let mut all = self.all();
        all.truncate(5);
        all
    }

    /// Every booking, newest created first
    #[must_use]
    pub fn all(&self) -> Vec<BookingRecord> {
        let mut all: Vec<BookingRecord> = self.lock().values().cloned().collect();
        all.sort_by(|a, b| b.created.cmp(&a.created));
        all
    }

    /// Confirm a pending booking
    pub fn confirm(&self, id: &BookingId) -> Result<()> {
        self.update_status(id, BookingStatus::Confirmed)
    }

    /// Cancel a booking; the record is kept for history
    pub fn cancel(&self, id: &BookingId) -> Result<()> {
        self.update_status(id, BookingStatus::Cancelled)
    }

    fn update_status(&self, id: &BookingId, next: BookingStatus) -> Result<()> {
        let record = self
            .lock()
            .get(&id.as_str())
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        match (record.status, next) {
            (BookingStatus::Confirmed, BookingStatus::Confirmed) => {
                return Err(Error::InvalidInput("booking is already confirmed".into()));
            }
            (BookingStatus::Cancelled, _) => {
                return Err(Error::InvalidInput("booking is already cancelled".into()));
            }
            _ => {}
        }

        let mut updated = record;
        updated.set_status(next);
        // The mirror refreshes through the subscription loop, never directly
        self.store.put(updated)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, BookingRecord>> {
        self.mirror.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveTime};
    use pretty_assertions::assert_eq;

    use crate::models::{ServiceId, StylistId};

    use super::*;

    fn booking(name: &str, date: (i32, u32, u32), time: (u32, u32)) -> BookingRecord {
        BookingRecord::new(
            StylistId::new("natasha"),
            ServiceId::Haircut,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            name,
            "client@example.com",
            "5550001111",
        )
    }

    #[test]
    fn mirror_follows_existing_and_new_records() {
        let store = Arc::new(BookingStore::in_memory());
        store.put(booking("Early", (2025, 3, 13), (10, 0))).unwrap();

        let dashboard = Dashboard::new(Arc::clone(&store));
        assert_eq!(dashboard.all().len(), 1);

        store.put(booking("Late", (2025, 3, 13), (11, 0))).unwrap();
        assert_eq!(dashboard.all().len(), 2);
    }

    #[test]
    fn stats_count_today_and_pending() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(Arc::clone(&store));

        let today = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        store.put(booking("A", (2025, 3, 13), (10, 0))).unwrap();
        store.put(booking("B", (2025, 3, 13), (11, 0))).unwrap();
        store.put(booking("C", (2025, 3, 14), (10, 0))).unwrap();

        let stats = dashboard.stats(today);
        assert_eq!(stats.today, 2);
        assert_eq!(stats.pending, 3);
    }

    #[test]
    fn day_grid_is_sorted_by_time() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(Arc::clone(&store));

        store.put(booking("Noon", (2025, 3, 13), (12, 0))).unwrap();
        store.put(booking("Morning", (2025, 3, 13), (9, 30))).unwrap();
        store.put(booking("Elsewhere", (2025, 3, 14), (8, 0))).unwrap();

        let grid = dashboard.day_grid(NaiveDate::from_ymd_opt(2025, 3, 13).unwrap());
        let names: Vec<&str> = grid.iter().map(|r| r.client_name.as_str()).collect();
        assert_eq!(names, vec!["Morning", "Noon"]);
    }

    #[test]
    fn recent_caps_at_five_newest_created() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(Arc::clone(&store));

        for i in 0..6 {
            let mut record = booking(&format!("Client {i}"), (2025, 3, 13), (10, 0));
            record.created += Duration::seconds(i);
            record.updated_at = record.created;
            store.put(record).unwrap();
        }

        let recent = dashboard.recent();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].client_name, "Client 5");
        assert!(recent.iter().all(|r| r.client_name != "Client 0"));
    }

    #[test]
    fn confirm_writes_back_and_refreshes_through_subscription() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(Arc::clone(&store));

        let record = booking("Jane", (2025, 3, 13), (10, 0));
        let id = record.id;
        store.put(record).unwrap();

        dashboard.confirm(&id).unwrap();

        assert_eq!(dashboard.all()[0].status, BookingStatus::Confirmed);
        assert_eq!(store.snapshot()[0].status, BookingStatus::Confirmed);
    }

    #[test]
    fn cancelled_records_stay_for_history() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(Arc::clone(&store));

        let record = booking("Jane", (2025, 3, 13), (10, 0));
        let id = record.id;
        store.put(record).unwrap();

        dashboard.cancel(&id).unwrap();
        assert_eq!(dashboard.all().len(), 1);
        assert_eq!(dashboard.all()[0].status, BookingStatus::Cancelled);
    }

    #[test]
    fn invalid_status_transitions_are_rejected() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(Arc::clone(&store));

        let record = booking("Jane", (2025, 3, 13), (10, 0));
        let id = record.id;
        store.put(record).unwrap();

        dashboard.confirm(&id).unwrap();
        assert!(matches!(
            dashboard.confirm(&id),
            Err(Error::InvalidInput(_))
        ));

        dashboard.cancel(&id).unwrap();
        assert!(matches!(dashboard.cancel(&id), Err(Error::InvalidInput(_))));
        assert!(matches!(
            dashboard.confirm(&id),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = Arc::new(BookingStore::in_memory());
        let dashboard = Dashboard::new(store);

        assert!(matches!(
            dashboard.confirm(&BookingId::new()),
            Err(Error::NotFound(_))
        ));
    }
}
