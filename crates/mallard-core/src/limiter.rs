use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{domain::ChatId, errors::Error, Result};

#[derive(Clone, Copy, Debug)]
struct Window {
    count: u32,
    started: Instant,
}

/// Fixed-window admission control, partitioned by chat.
///
/// Each chat gets `capacity` admissions per `window`; once the window has
/// elapsed the counter resets on the next `admit` call. The window is fixed,
/// not sliding: a burst of up to 2x capacity across a window boundary is
/// accepted behavior. Partitioning per chat keeps one noisy conversation
/// from starving the others.
///
/// Pure logic. Callers share an instance behind a mutex so the
/// read-check-increment sequence stays a single critical section; the lock
/// must not be held across network calls.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    window: Duration,
    windows: HashMap<ChatId, Window>,
}

impl RateLimiter {
    pub fn new(capacity: u32, window: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config(
                "rate limit capacity must be positive".to_string(),
            ));
        }
        if window.is_zero() {
            return Err(Error::Config(
                "rate limit window must be positive".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            window,
            windows: HashMap::new(),
        })
    }

    /// Decide whether one more request from `chat` may proceed, and count it
    /// if so. Refusals do not count against the window.
    pub fn admit(&mut self, chat: ChatId) -> bool {
        self.admit_at(chat, Instant::now())
    }

    pub fn admit_at(&mut self, chat: ChatId, now: Instant) -> bool {
        let window = self
            .windows
            .entry(chat)
            .or_insert(Window { count: 0, started: now });

        if now.duration_since(window.started) >= self.window {
            window.count = 0;
            window.started = now;
        }

        if window.count < self.capacity {
            window.count += 1;
            true
        } else {
            false
        }
    }
}
