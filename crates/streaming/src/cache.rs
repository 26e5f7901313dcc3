use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::Shared;
use parking_lot::Mutex;

use crate::source::{BoxFuture, SourceError};

type SharedFetch<T> = Shared<BoxFuture<'static, Result<T, SourceError>>>;

/// Residency of a [`SessionCache`] slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Residency {
    Empty,
    Fetching,
    Resident,
}

enum Slot<T: Clone> {
    Empty,
    Fetching { attempt: u64, fetch: SharedFetch<T> },
    Resident(T),
}

/// A session-lifetime value fetched at most once at a time.
///
/// - A resident value is served forever.
/// - Callers arriving while a fetch is in flight await that same fetch
///   (single-flight); no second fetch is started.
/// - A failed fetch leaves the slot empty, so a later call retries.
pub struct SessionCache<T: Clone> {
    slot: Mutex<Slot<T>>,
    attempts: AtomicU64,
}

impl<T> Default for SessionCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SessionCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn residency(&self) -> Residency {
        match &*self.slot.lock() {
            Slot::Empty => Residency::Empty,
            Slot::Fetching { .. } => Residency::Fetching,
            Slot::Resident(_) => Residency::Resident,
        }
    }

    pub fn get(&self) -> Option<T> {
        match &*self.slot.lock() {
            Slot::Resident(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Returns the resident value, joins the in-flight fetch, or starts a
    /// new one with `start`.
    pub async fn get_or_fetch<F>(&self, start: F) -> Result<T, SourceError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, SourceError>>,
    {
        let (attempt, fetch) = {
            let mut slot = self.slot.lock();
            match &*slot {
                Slot::Resident(value) => return Ok(value.clone()),
                Slot::Fetching { attempt, fetch } => (*attempt, fetch.clone()),
                Slot::Empty => {
                    let attempt = self.next_attempt();
                    let fetch = start().shared();
                    *slot = Slot::Fetching {
                        attempt,
                        fetch: fetch.clone(),
                    };
                    (attempt, fetch)
                }
            }
        };

        let result = fetch.await;

        let mut slot = self.slot.lock();
        // Only settle the attempt we awaited; a retry may already be running.
        if let Slot::Fetching { attempt: current, .. } = &*slot {
            if *current == attempt {
                *slot = match &result {
                    Ok(value) => Slot::Resident(value.clone()),
                    Err(_) => Slot::Empty,
                };
            }
        }
        result
    }

    fn next_attempt(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::Relaxed) + 1
    }
}
