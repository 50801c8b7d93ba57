use chrono::Utc;

use super::EpochMillis;

/// Source of wall-clock time for hosts driving the timeline.
///
/// The timeline itself never reads a clock; every operation takes `now`
/// explicitly. Hosts pick a clock and pass its reading in.
pub trait Clock {
    fn now_millis(&self) -> EpochMillis;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> EpochMillis {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a settable instant, for replay and deterministic tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: EpochMillis,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: EpochMillis) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: EpochMillis) {
        self.now = now;
    }

    pub fn advance(&mut self, delta_ms: i64) {
        self.now = self.now.saturating_add(delta_ms);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> EpochMillis {
        self.now
    }
}
