//! Per-doctor exclusive guard over slot-map mutations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Hands out one async mutex per doctor id.
///
/// Holding the guard serializes check-and-reserve against every other
/// booking or cancellation for the same doctor within this process.
/// Entries are never removed; the doctor population is small and stable.
#[derive(Default)]
pub struct SlotGuard {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl SlotGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `doctor_id`'s calendar.
    pub async fn acquire(&self, doctor_id: Uuid) -> DomainResult<OwnedMutexGuard<()>> {
        let lock = {
            let mut locks = self.locks.lock().map_err(|e| DomainError::Internal {
                message: format!("Slot guard registry poisoned: {}", e),
            })?;
            locks.entry(doctor_id).or_default().clone()
        };
        Ok(lock.lock_owned().await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_doctor_acquisitions_are_exclusive() {
        let guard = Arc::new(SlotGuard::new());
        let doctor_id = Uuid::new_v4();
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = guard.clone();
            let running = running.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                let _held = guard.acquire(doctor_id).await.unwrap();
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1, "critical section overlapped");
    }

    #[tokio::test]
    async fn test_different_doctors_do_not_contend() {
        let guard = SlotGuard::new();
        let first = guard.acquire(Uuid::new_v4()).await.unwrap();
        // Would deadlock if doctors shared a lock.
        let second = guard.acquire(Uuid::new_v4()).await.unwrap();
        drop(first);
        drop(second);
    }
}
