use chrono::{DateTime, Local};

/// Timestamp format for task records. Chosen so that comparing the
/// formatted strings agrees with comparing the underlying times.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current time. Injected into the store so that task
/// timestamps are deterministic under test.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Render a time with an explicit format string.
pub fn format_timestamp(time: DateTime<Local>, format: &str) -> String {
    time.format(format).to_string()
}

/// A clock that advances by one second on every reading.
#[cfg(test)]
pub struct StepClock {
    start: DateTime<Local>,
    ticks: std::cell::Cell<i32>,
}

#[cfg(test)]
impl StepClock {
    pub fn new() -> StepClock {
        use chrono::TimeZone;
        StepClock {
            start: Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            ticks: std::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl Clock for StepClock {
    fn now(&self) -> DateTime<Local> {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        self.start + chrono::Duration::seconds(i64::from(tick))
    }
}
