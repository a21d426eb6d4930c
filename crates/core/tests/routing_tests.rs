use chrono::Duration;
use pretty_assertions::assert_eq;
use timegate_core::config::{GateConfig, Principal};
use timegate_core::routing::{resolve_view, visible_items, RequestContext, ViewOutcome};
use timegate_core::predicate::{filter_for, QueryContext, Stage};
use timegate_core::ScheduledItem;

mod util;
use util::{spring_campaign, ymd};

#[test]
fn addressed_item_without_error_page_uses_fallback() {
    let item = spring_campaign();
    let ctx = RequestContext::addressing("spring");
    assert_eq!(
        resolve_view(&item, ymd(2023, 12, 1), false, &ctx),
        ViewOutcome::Redirect { location: "/campaigns/spring-404".into(), status: 404 }
    );
}

#[test]
fn addressed_item_inside_window_is_visible() {
    let item = spring_campaign();
    let ctx = RequestContext::addressing("spring").with_error_page("/404");
    assert_eq!(resolve_view(&item, ymd(2024, 3, 1), false, &ctx), ViewOutcome::Visible);
}

#[test]
fn privileged_principal_bypasses_redirect() {
    let cfg = GateConfig::default();
    let editor = Principal::with_permissions(["VIEW_DRAFT_CONTENT"]);
    let item = spring_campaign();
    let ctx = RequestContext::addressing("spring");
    assert_eq!(resolve_view(&item, ymd(2025, 1, 1), cfg.is_privileged(&editor), &ctx), ViewOutcome::Visible);
    assert_ne!(
        resolve_view(&item, ymd(2025, 1, 1), cfg.is_privileged(&Principal::anonymous()), &ctx),
        ViewOutcome::Visible
    );
}

#[test]
fn listing_omits_denied_items_in_order() {
    let now = ymd(2024, 3, 1);
    let items = vec![
        ScheduledItem::published("a"),
        ScheduledItem::published("b").with_embargo(now + Duration::days(1)),
        ScheduledItem::published("c").with_expiry(now + Duration::days(1)),
        ScheduledItem::published("d").with_expiry(now),
        ScheduledItem::draft("e"),
    ];
    let ids: Vec<&str> = visible_items(&items, now, false).iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "e"]);

    let all: Vec<&str> = visible_items(&items, now, true).iter().map(|i| i.id.as_str()).collect();
    assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn back_office_sees_expired_item_and_unfiltered_listing() {
    let now = ymd(2024, 7, 1);
    let item = spring_campaign();
    let listing = QueryContext { stage: Stage::Live, can_view_drafts: false, admin_context: true };
    assert!(filter_for(&listing, now).is_none());

    let ctx = RequestContext::addressing("spring").in_admin();
    assert_eq!(resolve_view(&item, now, false, &ctx), ViewOutcome::Visible);

    let front = RequestContext::addressing("spring");
    assert_eq!(
        resolve_view(&item, now, false, &front),
        ViewOutcome::Redirect { location: "/campaigns/spring-404".into(), status: 404 }
    );
}
