//! Replication transport seam
//!
//! The store publishes accepted writes through a [`ReplicationTransport`];
//! deliveries come back in through `BookingStore::apply_remote`. The
//! substrate is gossip-style: no ordering across ids, no delivery deadline.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::models::BookingRecord;
use crate::store::BookingStore;

/// Identifies one connected replica within a transport
pub type ReplicaId = usize;

/// Gossip substrate seam: fan a locally accepted record out to the network
pub trait ReplicationTransport: Send + Sync {
    fn publish(&self, origin: ReplicaId, record: &BookingRecord) -> Result<()>;
}

/// In-process transport wiring multiple stores as gossiping replicas.
///
/// Every record accepted by one connected store is delivered to every other
/// connected store. Useful for tests and single-process multi-session demos;
/// a networked substrate implements the same trait.
#[derive(Default)]
pub struct MemoryHub {
    peers: Mutex<Vec<(ReplicaId, Arc<BookingStore>)>>,
}

impl MemoryHub {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a new store connected to this hub
    pub fn connect(self: &Arc<Self>) -> Arc<BookingStore> {
        let mut peers = self.peers.lock().unwrap_or_else(PoisonError::into_inner);
        let replica = peers.len();
        let store = Arc::new(BookingStore::with_transport(
            Arc::clone(self) as Arc<dyn ReplicationTransport>,
            replica,
            None,
        ));
        peers.push((replica, Arc::clone(&store)));
        store
    }
}

impl ReplicationTransport for MemoryHub {
    fn publish(&self, origin: ReplicaId, record: &BookingRecord) -> Result<()> {
        let peers = self.peers.lock().unwrap_or_else(PoisonError::into_inner);
        for (replica, peer) in peers.iter() {
            if *replica != origin {
                peer.apply_remote(record.clone());
            }
        }
        Ok(())
    }
}
