//! Sources for "now".
//!
//! The gate takes `now` as a parameter. Callers pick a clock: wall time in
//! production, a fixed instant in tests and reproducible pipelines.

use chrono::{DateTime, TimeZone, Utc};

/// Milliseconds since the Unix epoch; highest precedence override.
pub const TIME_MS_ENV: &str = "TIMEGATE_TIME_MS";
/// Seconds since the Unix epoch (reproducible-builds convention).
pub const SOURCE_DATE_EPOCH_ENV: &str = "SOURCE_DATE_EPOCH";

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Reproducible "now".
///
/// Precedence:
///   1) `TIMEGATE_TIME_MS`
///   2) `SOURCE_DATE_EPOCH`
///   3) wall clock
///
/// Unparseable values are skipped, not reported.
pub fn deterministic_now() -> DateTime<Utc> {
    now_from_lookup(|k| std::env::var(k).ok(), &SystemClock)
}

/// Same precedence as [`deterministic_now`] over an arbitrary variable source.
pub fn now_from_lookup<F, C>(lookup: F, fallback: &C) -> DateTime<Utc>
where
    F: Fn(&str) -> Option<String>,
    C: Clock,
{
    if let Some(ms) = lookup(TIME_MS_ENV).and_then(|s| s.trim().parse::<i64>().ok()) {
        if let Some(t) = Utc.timestamp_millis_opt(ms).single() {
            return t;
        }
    }
    if let Some(sec) = lookup(SOURCE_DATE_EPOCH_ENV).and_then(|s| s.trim().parse::<i64>().ok()) {
        if let Some(t) = Utc.timestamp_opt(sec, 0).single() {
            return t;
        }
    }
    fallback.now()
}
