//! Host clock collaborator.
//!
//! The engine never reads the wall clock itself; callers hand it "now" through [`Clock`].

use chrono::{DateTime, NaiveDateTime, Utc};

/// Source of the current standard time, in seconds since the Unix epoch.
pub trait Clock {
    fn now_standard(&self) -> i64;
}

/// Wall clock of the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_standard(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a fixed instant, for replaying a moment.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_standard(&self) -> i64 {
        self.0
    }
}

/// Calendar breakdown of a timestamp in its own basis (no zone conversion).
pub fn calendar(t: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(t, 0).map(|dt| dt.naive_utc())
}
