//! System clock adapter.
//!
//! Wall-clock time is deliberate: the timestamps handed to event
//! scripts are epoch seconds, so they must come from the real clock,
//! not a monotonic one. The debouncer protects itself against
//! backwards steps with saturating arithmetic.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::app::ports::Clock;

/// Real wall clock and real sleeping.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }

    fn sleep_ms(&self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
