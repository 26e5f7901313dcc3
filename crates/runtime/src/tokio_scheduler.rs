use std::collections::HashMap;
use std::time::Duration;

use foundation::ids::IdAllocator;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::scheduler::{TimerId, TimerScheduler};

/// Wall-clock timers backed by `tokio::time::sleep`.
///
/// Elapsed timers are delivered on the receiver returned by
/// [`TokioScheduler::new`]. Must be used from within a Tokio runtime.
pub struct TokioScheduler {
    ids: IdAllocator,
    fired: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            ids: IdAllocator::new(),
            fired,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl TimerScheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());

        let id = TimerId(self.ids.allocate());
        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver may already be gone during shutdown.
            let _ = fired.send(id);
        });
        self.tasks.insert(id, task);
        tracing::trace!(timer = id.0.get(), ?delay, "timer scheduled");
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let Some(task) = self.tasks.remove(&id) else {
            return false;
        };
        let was_pending = !task.is_finished();
        task.abort();
        was_pending
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
