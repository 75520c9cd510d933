//! Transient success notice.
//!
//! At most one notice is visible. Showing a new one replaces the message and
//! restarts the dismissal timer.

use std::time::{Duration, Instant};

/// Default time a notice stays visible.
pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct Notice {
    delay: Duration,
    current: Option<(String, Instant)>,
}

impl Default for Notice {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DELAY)
    }
}

impl Notice {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: None,
        }
    }

    /// Show `message` until `now + delay`, replacing any pending notice.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some((message.into(), now + self.delay));
    }

    /// Message to display at `now`, if it has not expired.
    pub fn visible(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((message, deadline)) if now < *deadline => Some(message),
            _ => None,
        }
    }

    /// Drop an expired notice. Returns true when one was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if matches!(&self.current, Some((_, deadline)) if now >= *deadline) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
