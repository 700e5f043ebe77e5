//! Deferred one-shot timer registry
//!
//! The only asynchronous element in the simulation: temporary-brick expiry
//! and shield expiry are scheduled here and polled from the tick against the
//! session clock. Nothing fires between ticks, so there is exactly one
//! mutator thread of control and no locking.
//!
//! Cancellation is explicit and idempotent: cancelling an absent or
//! already-fired entry is a no-op, and session teardown cancels everything
//! so no late effect can touch discarded state.

/// Handle returned by [`Timers::schedule`]
pub type TimerId = u32;

/// What a timer does when it fires. Effects are applied by the tick, which
/// checks the target is still live first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Deactivate the brick with this id
    ExpireBrick(u32),
    /// Clear the player's shield buff
    ExpireShield,
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    deadline_ms: f64,
    task: TimerTask,
}

/// Registry of pending one-shot deadlines keyed by session-clock time
#[derive(Debug, Clone, Default)]
pub struct Timers {
    entries: Vec<Entry>,
    next_id: TimerId,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire once the session clock reaches `deadline_ms`
    pub fn schedule(&mut self, deadline_ms: f64, task: TimerTask) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline_ms,
            task,
        });
        id
    }

    /// Cancel a pending timer. No-op if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    /// Cancel any pending expiry for the given brick. Idempotent.
    pub fn cancel_brick(&mut self, brick_id: u32) {
        self.entries
            .retain(|e| e.task != TimerTask::ExpireBrick(brick_id));
    }

    /// Cancel every pending timer (session teardown / restart)
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Whether a shield expiry is already pending. A shield grant while one
    /// is pending keeps the earlier deadline rather than extending it.
    pub fn shield_pending(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.task == TimerTask::ExpireShield)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every task whose deadline has passed, ordered by
    /// deadline so earlier timers apply their effects first.
    pub fn fire_due(&mut self, now_ms: f64) -> Vec<TimerTask> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.deadline_ms <= now_ms {
                due.push(e.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| {
            a.deadline_ms
                .partial_cmp(&b.deadline_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        due.into_iter().map(|e| e.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_deadline_not_before() {
        let mut timers = Timers::new();
        timers.schedule(100.0, TimerTask::ExpireShield);
        assert!(timers.fire_due(99.9).is_empty());
        assert_eq!(timers.fire_due(100.0), vec![TimerTask::ExpireShield]);
        // One-shot: does not fire again
        assert!(timers.fire_due(200.0).is_empty());
    }

    #[test]
    fn test_fire_order_by_deadline() {
        let mut timers = Timers::new();
        timers.schedule(300.0, TimerTask::ExpireBrick(3));
        timers.schedule(100.0, TimerTask::ExpireBrick(1));
        timers.schedule(200.0, TimerTask::ExpireBrick(2));
        assert_eq!(
            timers.fire_due(300.0),
            vec![
                TimerTask::ExpireBrick(1),
                TimerTask::ExpireBrick(2),
                TimerTask::ExpireBrick(3),
            ]
        );
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timers = Timers::new();
        let id = timers.schedule(100.0, TimerTask::ExpireBrick(7));
        timers.cancel(id);
        timers.cancel(id); // already gone - no-op
        assert!(timers.fire_due(1000.0).is_empty());
    }

    #[test]
    fn test_cancel_brick_leaves_others() {
        let mut timers = Timers::new();
        timers.schedule(100.0, TimerTask::ExpireBrick(1));
        timers.schedule(100.0, TimerTask::ExpireShield);
        timers.cancel_brick(1);
        timers.cancel_brick(1);
        assert_eq!(timers.fire_due(100.0), vec![TimerTask::ExpireShield]);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::new();
        timers.schedule(100.0, TimerTask::ExpireBrick(1));
        timers.schedule(200.0, TimerTask::ExpireShield);
        timers.cancel_all();
        assert!(timers.is_empty());
        assert!(timers.fire_due(f64::MAX).is_empty());
    }

    #[test]
    fn test_shield_pending() {
        let mut timers = Timers::new();
        assert!(!timers.shield_pending());
        timers.schedule(100.0, TimerTask::ExpireShield);
        assert!(timers.shield_pending());
        timers.fire_due(100.0);
        assert!(!timers.shield_pending());
    }
}
