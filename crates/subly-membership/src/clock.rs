//! Time source for issuance and verification.
//!
//! All timestamps are Unix seconds as `i64`, matching the on-chain clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can tell the current Unix time in seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock time from [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_secs())
                .map(|secs| -secs)
                .unwrap_or(i64::MIN),
        }
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    /// Move the clock by `seconds` (negative goes back).
    pub fn advance(&mut self, seconds: i64) {
        self.0 = self.0.saturating_add(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> i64 {
        (**self).now()
    }
}
