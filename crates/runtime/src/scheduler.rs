use std::collections::BTreeMap;
use std::time::Duration;

use foundation::ids::{Id, IdAllocator};
use foundation::time::Time;

/// Handle for a pending one-shot timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub Id);

/// One-shot timer capability.
///
/// Scheduling takes no callback. When a timer elapses its `TimerId` is
/// handed back to the owner (see [`ManualScheduler::advance`] and
/// [`crate::TokioScheduler::new`]), which routes it to whoever armed it.
pub trait TimerScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Returns `true` if the timer was still pending.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Deterministic fake clock.
///
/// Ordering contract:
/// - `advance` returns elapsed timers by `(deadline, TimerId)`.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Time,
    ids: IdAllocator,
    pending: BTreeMap<TimerId, Time>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Moves the clock forward by `dt` and returns every timer that elapsed.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        self.now = self.now.after(dt);
        let now = self.now;

        let mut due: Vec<(TimerId, Time)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*id, *deadline))
            .collect();
        due.sort_by(|(ia, a), (ib, b)| a.0.total_cmp(&b.0).then_with(|| ia.cmp(ib)));

        for (id, _) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(id, _)| id).collect()
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.ids.allocate());
        self.pending.insert(id, self.now.after(delay));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }
}
