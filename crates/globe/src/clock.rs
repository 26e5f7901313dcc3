use std::time::Duration;

use runtime::{TimerId, TimerScheduler};
use tracing::debug;

use crate::capability::GlobeCapability;

/// Default idle delay before auto-rotation may resume.
pub const DEFAULT_IDLE_DELAY: Duration = Duration::from_secs(30);

/// Idle timer that pauses auto-rotation while the user is active.
///
/// At most one timer is pending at any time: arming always cancels the
/// previous handle first.
#[derive(Debug)]
pub struct InteractionClock {
    idle_delay: Duration,
    armed: Option<TimerId>,
    torn_down: bool,
}

impl InteractionClock {
    pub fn new(idle_delay: Duration) -> Self {
        Self {
            idle_delay,
            armed: None,
            torn_down: false,
        }
    }

    pub fn idle_delay(&self) -> Duration {
        self.idle_delay
    }

    pub fn armed(&self) -> Option<TimerId> {
        self.armed
    }

    /// Stops rotation and restarts the idle countdown.
    pub fn on_interaction(
        &mut self,
        scheduler: &mut dyn TimerScheduler,
        globe: &mut dyn GlobeCapability,
    ) {
        if self.torn_down {
            return;
        }
        globe.set_auto_rotate(false);
        if let Some(prev) = self.armed.take() {
            scheduler.cancel(prev);
        }
        let id = scheduler.schedule(self.idle_delay);
        self.armed = Some(id);
    }

    /// Returns `true` when `id` is the armed timer, meaning the idle delay
    /// elapsed. Stale ids are ignored.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.armed != Some(id) {
            debug!(?id, "ignoring stale idle timer");
            return false;
        }
        self.armed = None;
        true
    }

    /// Cancels the pending timer. Later interactions arm nothing.
    pub fn teardown(&mut self, scheduler: &mut dyn TimerScheduler) {
        if let Some(id) = self.armed.take() {
            scheduler.cancel(id);
        }
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionClock;
    use crate::capability::GlobeCapability;
    use crate::testing::FakeGlobe;
    use runtime::{ManualScheduler, TimerScheduler};
    use std::time::Duration;

    const DELAY: Duration = Duration::from_secs(30);

    #[test]
    fn rearming_keeps_a_single_pending_timer() {
        let mut sched = ManualScheduler::new();
        let mut globe = FakeGlobe::default();
        let mut clock = InteractionClock::new(DELAY);

        for _ in 0..5 {
            clock.on_interaction(&mut sched, &mut globe);
            sched.advance(Duration::from_secs(10));
        }
        assert_eq!(sched.pending_count(), 1);
        assert!(!globe.auto_rotate);
    }

    #[test]
    fn only_the_armed_timer_fires() {
        let mut sched = ManualScheduler::new();
        let mut globe = FakeGlobe::default();
        let mut clock = InteractionClock::new(DELAY);

        clock.on_interaction(&mut sched, &mut globe);
        let first = clock.armed().expect("armed");
        clock.on_interaction(&mut sched, &mut globe);

        assert!(!clock.on_timer(first));
        let fired = sched.advance(DELAY);
        assert_eq!(fired.len(), 1);
        assert!(clock.on_timer(fired[0]));
        assert!(!clock.on_timer(fired[0]));
    }

    #[test]
    fn teardown_cancels_and_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let mut globe = FakeGlobe::default();
        let mut clock = InteractionClock::new(DELAY);

        clock.on_interaction(&mut sched, &mut globe);
        clock.teardown(&mut sched);
        clock.teardown(&mut sched);
        assert_eq!(sched.pending_count(), 0);

        clock.on_interaction(&mut sched, &mut globe);
        assert_eq!(sched.pending_count(), 0);
        assert!(sched.advance(DELAY * 2).is_empty());
    }

    #[test]
    fn interaction_pauses_rotation() {
        let mut sched = ManualScheduler::new();
        let mut globe = FakeGlobe::default();
        globe.set_auto_rotate(true);
        InteractionClock::new(DELAY).on_interaction(&mut sched, &mut globe);
        assert!(!globe.auto_rotate);
    }
}
