//! Client-side id generation.
//!
//! Ids are decimal millisecond timestamps. A generator never hands out the
//! same value twice: when the clock has not moved past the last id (two adds
//! in the same millisecond, or a clock step backwards) it issues `last + 1`.

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for the current wall-clock time.
    pub fn next_id(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.next_at(now)
    }

    /// Next id given an explicit timestamp in milliseconds.
    pub fn next_at(&mut self, millis: u64) -> String {
        let id = if millis > self.last { millis } else { self.last + 1 };
        self.last = id;
        id.to_string()
    }
}
