use chrono::{DateTime, TimeZone, Utc};
use timegate_core::ScheduledItem;

/// RFC 3339 instant; panics on malformed fixtures.
#[allow(dead_code)]
pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).expect("fixture instant").with_timezone(&Utc)
}

#[allow(dead_code)]
pub fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Published item with embargo 2024-01-01 and expiry 2024-06-01.
#[allow(dead_code)]
pub fn spring_campaign() -> ScheduledItem {
    ScheduledItem::published("spring")
        .with_embargo(ymd(2024, 1, 1))
        .with_expiry(ymd(2024, 6, 1))
        .with_link("/campaigns/spring/")
}
