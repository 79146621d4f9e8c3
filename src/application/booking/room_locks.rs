//! Per-room mutual exclusion for check-then-persist sequences.
//!
//! Only serializes bookings inside this process.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct RoomLocks {
    locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room_id`; released when the guard drops.
    pub async fn acquire(&self, room_id: i32) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
