//! Replicated booking record store
//!
//! One `BookingStore` is one replica's view of the booking set. Writers call
//! [`BookingStore::put`]; every consumer builds its own mirror purely from
//! [`BookingStore::subscribe`] notifications. Records merge last-write-wins
//! on `updatedAt`; there is no delete, cancellation is a status update.

pub mod journal;
pub mod transport;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::models::BookingRecord;

pub use journal::Journal;
pub use transport::{MemoryHub, ReplicaId, ReplicationTransport};

/// Replication health as seen by this replica
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplicationState {
    /// No transport configured; journal-backed single replica
    Local,
    /// Connected to the replication substrate
    Connected,
    /// Transport failed; writes continue against the local journal only
    Degraded,
}

type Listener = Box<dyn FnMut(&BookingRecord) + Send>;

struct Inner {
    records: BTreeMap<String, BookingRecord>,
    listeners: Vec<Listener>,
    replication: ReplicationState,
}

/// One replica of the peer-to-peer booking collection
pub struct BookingStore {
    inner: Mutex<Inner>,
    transport: Option<Arc<dyn ReplicationTransport>>,
    replica: ReplicaId,
    journal: Option<Journal>,
}

impl BookingStore {
    /// Ephemeral store with no transport and no journal
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: BTreeMap::new(),
                listeners: Vec::new(),
                replication: ReplicationState::Local,
            }),
            transport: None,
            replica: 0,
            journal: None,
        }
    }

    /// Journal-backed local store; existing records are loaded into the mirror
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let journal = Journal::new(path);
        let mut records = BTreeMap::new();
        for record in journal.load()? {
            records.insert(record.id.as_str(), record);
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                records,
                listeners: Vec::new(),
                replication: ReplicationState::Local,
            }),
            transport: None,
            replica: 0,
            journal: Some(journal),
        })
    }

    /// Store connected to a replication substrate, with an optional journal
    /// as the durable fallback for degraded operation
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn ReplicationTransport>,
        replica: ReplicaId,
        journal: Option<Journal>,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: BTreeMap::new(),
                listeners: Vec::new(),
                replication: ReplicationState::Connected,
            }),
            transport: Some(transport),
            replica,
            journal,
        }
    }

    /// Upsert a record: merge into the mirror, notify subscribers, then fan
    /// out through the transport.
    ///
    /// A transport failure is not an error: the store degrades silently to
    /// local-only operation and the write lands in the journal. Journal I/O
    /// failures do propagate.
    pub fn put(&self, record: BookingRecord) -> Result<()> {
        if !self.merge_and_notify(&record) {
            return Ok(());
        }
        self.publish(&record);
        self.persist()
    }

    /// Entry point for records delivered by the replication substrate.
    /// Same merge/notify path as `put`, without re-publishing.
    pub fn apply_remote(&self, record: BookingRecord) {
        if self.merge_and_notify(&record) {
            if let Err(error) = self.persist() {
                tracing::warn!(%error, "failed to journal remotely delivered record");
            }
        }
    }

    /// Register a listener: fired once per record already in the mirror,
    /// then once per subsequently accepted upsert (local or remote).
    ///
    /// Listeners run on the writer's call path and must not re-enter the
    /// store.
    pub fn subscribe(&self, mut listener: impl FnMut(&BookingRecord) + Send + 'static) {
        let mut inner = self.lock();
        for record in inner.records.values() {
            listener(record);
        }
        inner.listeners.push(Box::new(listener));
    }

    /// Copy of the mirror, in id order
    #[must_use]
    pub fn snapshot(&self) -> Vec<BookingRecord> {
        self.lock().records.values().cloned().collect()
    }

    #[must_use]
    pub fn replication_state(&self) -> ReplicationState {
        self.lock().replication
    }

    fn merge_and_notify(&self, record: &BookingRecord) -> bool {
        let mut inner = self.lock();
        let id = record.id.as_str();

        let accepted = match inner.records.get(&id) {
            None => true,
            Some(existing) => lww_wins(record, existing),
        };
        if !accepted {
            tracing::debug!(id = %record.id, "ignored stale or duplicate update");
            return false;
        }

        inner.records.insert(id, record.clone());
        for listener in &mut inner.listeners {
            listener(record);
        }
        true
    }

    fn publish(&self, record: &BookingRecord) {
        let Some(transport) = &self.transport else {
            return;
        };
        if self.replication_state() == ReplicationState::Degraded {
            return;
        }
        if let Err(error) = transport.publish(self.replica, record) {
            tracing::warn!(%error, "replication substrate unavailable, degrading to local journal");
            self.lock().replication = ReplicationState::Degraded;
        }
    }

    fn persist(&self) -> Result<()> {
        match &self.journal {
            Some(journal) => journal.save(&self.snapshot()),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Last-write-wins merge: the larger `updatedAt` takes the whole record.
/// Equal timestamps tie-break on the canonical JSON form so every replica
/// resolves the tie identically without coordination.
fn lww_wins(incoming: &BookingRecord, existing: &BookingRecord) -> bool {
    match incoming.updated_at.cmp(&existing.updated_at) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => canonical_json(incoming) > canonical_json(existing),
    }
}

fn canonical_json(record: &BookingRecord) -> String {
    serde_json::to_string(record).unwrap_or_default()
}
