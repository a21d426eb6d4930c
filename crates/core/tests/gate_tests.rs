use chrono::Duration;
use pretty_assertions::assert_eq;
use timegate_core::gate::{is_expired, is_live, is_scheduled};
use timegate_core::{
    authorize_view, classify, status_flags, status_label, LabelKind, ScheduledItem, StatusFlag, StatusLabel,
    TemporalState, ViewDecision,
};

mod util;
use util::{at, spring_campaign, ymd};

const DENY: ViewDecision = ViewDecision::DenyWithRedirect { status: 404 };

#[test]
fn draft_is_unpublished_whatever_the_window() {
    let now = ymd(2024, 3, 1);
    let draft = ScheduledItem::draft("d")
        .with_embargo(now + Duration::days(1))
        .with_expiry(now - Duration::days(1));
    assert_eq!(classify(&draft, now), TemporalState::Unpublished);
    assert!(!is_scheduled(&draft, now));
    assert!(!is_expired(&draft, now));
    assert_eq!(authorize_view(&draft, now, false), ViewDecision::Allow);
    assert!(status_flags(TemporalState::Unpublished).is_empty());
}

#[test]
fn no_window_is_always_active() {
    let item = ScheduledItem::published("a");
    for now in [ymd(1970, 1, 2), ymd(2024, 2, 29), ymd(2999, 12, 31)] {
        assert_eq!(classify(&item, now), TemporalState::Active);
        assert!(is_live(&item, now));
    }
}

#[test]
fn embargo_in_the_future_is_pending() {
    let now = ymd(2024, 3, 1);
    let embargo = now + Duration::seconds(1);
    let item = ScheduledItem::published("a").with_embargo(embargo);
    assert_eq!(classify(&item, now), TemporalState::PendingEmbargo);
    assert_eq!(classify(&item, embargo - Duration::nanoseconds(1)), TemporalState::PendingEmbargo);
    assert_eq!(classify(&item, embargo), TemporalState::Active);
    assert_eq!(classify(&item, embargo + Duration::days(365)), TemporalState::Active);
}

#[test]
fn expiry_in_the_past_is_expired() {
    let now = ymd(2024, 3, 1);
    let expiry = now - Duration::seconds(1);
    let item = ScheduledItem::published("a").with_expiry(expiry);
    assert_eq!(classify(&item, now), TemporalState::Expired);
    assert_eq!(classify(&item, expiry), TemporalState::Expired);
    assert_eq!(classify(&item, expiry + Duration::nanoseconds(1)), TemporalState::Expired);
    assert_ne!(classify(&item, expiry - Duration::nanoseconds(1)), TemporalState::Expired);
}

#[test]
fn misconfigured_window_prefers_embargo() {
    let t = ymd(2024, 3, 1);
    let item = ScheduledItem::published("a")
        .with_embargo(t + Duration::seconds(10))
        .with_expiry(t - Duration::seconds(10));
    assert_eq!(classify(&item, t), TemporalState::PendingEmbargo);
    assert_eq!(status_flags(classify(&item, t)).into_iter().collect::<Vec<_>>(), vec![StatusFlag::Scheduled]);
    assert_eq!(authorize_view(&item, t, false), DENY);
}

#[test]
fn privileged_viewer_always_allowed() {
    let now = ymd(2024, 3, 1);
    let items = [
        ScheduledItem::published("pending").with_embargo(now + Duration::days(1)),
        ScheduledItem::published("expired").with_expiry(now - Duration::days(1)),
        ScheduledItem::draft("draft"),
    ];
    for item in &items {
        assert_eq!(authorize_view(item, now, true), ViewDecision::Allow, "{}", item.id);
    }
}

#[test]
fn mid_window_is_active_and_will_expire() {
    let item = spring_campaign();
    let now = at("2024-03-01T00:00:00Z");
    let state = classify(&item, now);
    assert_eq!(state, TemporalState::Active);
    assert_eq!(authorize_view(&item, now, false), ViewDecision::Allow);
    assert_eq!(
        status_label(&item, state),
        StatusLabel { kind: LabelKind::WillExpire, at: Some(at("2024-06-01T00:00:00Z")) }
    );
}

#[test]
fn one_second_before_embargo_is_denied() {
    let item = spring_campaign();
    let now = at("2023-12-31T23:59:59Z");
    let state = classify(&item, now);
    assert_eq!(state, TemporalState::PendingEmbargo);
    assert_eq!(authorize_view(&item, now, false), DENY);
    assert_eq!(status_flags(state).iter().map(StatusFlag::key).collect::<Vec<_>>(), vec!["scheduled"]);
    assert_eq!(
        status_label(&item, state),
        StatusLabel { kind: LabelKind::Scheduled, at: Some(at("2024-01-01T00:00:00Z")) }
    );
}

#[test]
fn exact_expiry_instant_is_expired() {
    let item = spring_campaign();
    let now = at("2024-06-01T00:00:00Z");
    let state = classify(&item, now);
    assert_eq!(state, TemporalState::Expired);
    assert_eq!(authorize_view(&item, now, false), DENY);
    assert_eq!(authorize_view(&item, now, true), ViewDecision::Allow);
    assert_eq!(
        status_label(&item, state),
        StatusLabel { kind: LabelKind::Expired, at: Some(at("2024-06-01T00:00:00Z")) }
    );
}

#[test]
fn draft_with_expiry_has_no_label() {
    let now = ymd(2024, 3, 1);
    for expiry in [now - Duration::days(1), now, now + Duration::days(1)] {
        let draft = ScheduledItem::draft("d").with_expiry(expiry);
        let state = classify(&draft, now);
        assert_eq!(state, TemporalState::Unpublished);
        assert_eq!(status_label(&draft, state), StatusLabel::none());
    }
}
