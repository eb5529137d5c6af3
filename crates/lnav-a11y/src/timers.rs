//! Deferred tasks
//!
//! Virtual-clock timer queue for fire-and-forget work scheduled by the
//! navigator. The host advances the clock and hands due tasks back.

use lnav_dom::NodeId;

/// How long a momentary highlight stays visible
pub const MOMENTARY_HIGHLIGHT_MS: u64 = 250;

/// Work the navigator defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Clear the highlight from a node of the page view `page`. Idempotent;
    /// a detached node or a page that has since been replaced is a no-op.
    RemoveHighlight { node: NodeId, page: u64 },
}

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    task: DeferredTask,
    due_at: u64,
}

/// One-shot timers on a millisecond virtual clock
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_timer_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task `delay_ms` from now
    pub fn set_timeout(&mut self, task: DeferredTask, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timers.push(Timer {
            id,
            task,
            due_at: self.current_time.saturating_add(delay_ms),
        });
        id
    }

    /// Cancel a timer. Unknown or already fired ids are ignored.
    pub fn clear_timer(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    /// Advance time and return the tasks that became due, ordered by due
    /// time then scheduling order
    pub fn tick(&mut self, delta_ms: u64) -> Vec<DeferredTask> {
        self.current_time = self.current_time.saturating_add(delta_ms);
        let now = self.current_time;

        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due_at <= now);
        self.timers = pending;

        due.sort_by_key(|t| (t.due_at, t.id));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Current virtual time in ms
    pub fn now(&self) -> u64 {
        self.current_time
    }
}
