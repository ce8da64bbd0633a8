//! Injected time source for join timestamps.
//!
//! # Invariants
//! - Stamps are local time formatted `YYYY-MM-DD HH:MM:SS`.

use chrono::Local;

/// Format used for every `created_at` stamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Supplies the current time as a formatted stamp.
pub trait Clock {
    fn now_stamp(&self) -> String;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_stamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Clock that always returns the same stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    stamp: String,
}

impl FixedClock {
    pub fn new(stamp: impl Into<String>) -> Self {
        Self {
            stamp: stamp.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now_stamp(&self) -> String {
        self.stamp.clone()
    }
}
