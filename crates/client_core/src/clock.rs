use chrono::{Local, NaiveDateTime, Utc};

pub trait Clock: Send + Sync {
    /// Local wall-clock time, used for display stamps.
    fn now_local(&self) -> NaiveDateTime;
    /// Milliseconds since the Unix epoch, used to derive ids.
    fn epoch_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at one instant.
pub struct FixedClock {
    local: NaiveDateTime,
    millis: i64,
}

impl FixedClock {
    pub fn at(local: NaiveDateTime) -> Self {
        Self {
            local,
            millis: local.and_utc().timestamp_millis(),
        }
    }
}

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.local
    }

    fn epoch_millis(&self) -> i64 {
        self.millis
    }
}

/// Timestamp-derived ids that never repeat, even within one millisecond.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    pub fn next(&mut self, now_millis: i64) -> i64 {
        let id = now_millis.max(self.last + 1);
        self.last = id;
        id
    }
}
