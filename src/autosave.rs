//! Trailing-edge debounce for auto-saving: every mutation re-arms the
//! timer, and the save runs only once the scene has settled for the
//! configured delay.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutosaveTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Schedules (or reschedules) the save for `now + delay`. A pending
    /// deadline is replaced, which is what makes the debounce trailing-edge.
    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per armed deadline, the first time `now` reaches it.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
