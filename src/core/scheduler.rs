//! Cooperative interval timers for one display context.
//!
//! Nothing runs concurrently: the owner asks for the tasks that are due,
//! runs each to completion, then sleeps until [`Scheduler::next_deadline`].

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Render and decrement the countdown.
    Tick,
    /// Re-read the store looking for external edits.
    Poll,
}

#[derive(Debug)]
struct Interval {
    id: TimerId,
    task: Task,
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Interval>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` every `period`, first run one period after `now`.
    pub fn set_interval(&mut self, task: Task, period: Duration, now: Instant) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Interval {
            id,
            task,
            period,
            next_due: now + period,
        });
        id
    }

    /// Cancel a timer. Returns false if it was not active.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self, task: Task) -> usize {
        self.timers.iter().filter(|t| t.task == task).count()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    /// Collect every timer due at `now`, earliest first, and move each one
    /// to its next deadline. A timer that fell several periods behind fires
    /// once, not once per missed period.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerId, Task)> {
        let mut due: Vec<(Instant, TimerId, Task)> = Vec::new();

        for t in self.timers.iter_mut() {
            if t.next_due > now {
                continue;
            }
            due.push((t.next_due, t.id, t.task));
            while t.next_due <= now {
                t.next_due += t.period;
            }
        }

        due.sort_by_key(|(at, id, _)| (*at, *id));
        due.into_iter().map(|(_, id, task)| (id, task)).collect()
    }
}
