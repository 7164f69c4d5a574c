use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::Mutex;

/// Millisecond wall clock that never hands out the same instant twice.
///
/// Stored timestamps are the only sort key for history, and MongoDB dates
/// carry millisecond precision, so two writes in the same millisecond would
/// otherwise tie. Each call returns a value strictly after the previous one.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(3);
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let next = match *last {
            Some(prev) if now <= prev => prev + Duration::milliseconds(1),
            _ => now,
        };
        *last = Some(next);
        next
    }
}
