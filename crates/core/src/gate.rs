//! Temporal gate: classify an item's window and decide single-item views.
//!
//! Every function here is pure. `now` is always supplied by the caller; the
//! gate never reads a clock, never logs and never touches shared state.
//!
//! Precedence: unpublished, then embargo, then expiry. A misconfigured item
//! (embargo after expiry) evaluated between the two instants is therefore
//! `PendingEmbargo`, never `Expired`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::ScheduledItem;

/// Status code suggested to the routing layer on denial.
pub const NOT_FOUND_STATUS: u16 = 404;

/// Derived temporal state of an item at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalState {
    Unpublished,
    PendingEmbargo,
    Active,
    Expired,
}

impl TemporalState {
    /// States an unprivileged viewer is denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, TemporalState::PendingEmbargo | TemporalState::Expired)
    }
}

/// Verdict for a single-item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ViewDecision {
    Allow,
    DenyWithRedirect { status: u16 },
}

/// Classify `item` at `now`.
pub fn classify(item: &ScheduledItem, now: DateTime<Utc>) -> TemporalState {
    if !item.published {
        return TemporalState::Unpublished;
    }
    if let Some(embargo) = item.embargo_at {
        if embargo > now {
            return TemporalState::PendingEmbargo;
        }
    }
    if let Some(expiry) = item.expiry_at {
        if expiry <= now {
            return TemporalState::Expired;
        }
    }
    TemporalState::Active
}

/// Published and the embargo instant is still ahead.
pub fn is_scheduled(item: &ScheduledItem, now: DateTime<Utc>) -> bool {
    item.published && item.embargo_at.is_some_and(|e| e > now)
}

/// Published and the expiry instant has been reached.
///
/// Independent of the embargo: a misconfigured item can be both scheduled and
/// expired here while `classify` reports only `PendingEmbargo`.
pub fn is_expired(item: &ScheduledItem, now: DateTime<Utc>) -> bool {
    item.published && item.expiry_at.is_some_and(|e| e <= now)
}

/// Neither scheduled nor expired. Drafts count as live; draft visibility is
/// decided elsewhere.
pub fn is_live(item: &ScheduledItem, now: DateTime<Utc>) -> bool {
    !is_scheduled(item, now) && !is_expired(item, now)
}

/// May a viewer see `item` at `now`? Privilege short-circuits before the
/// item is classified.
pub fn authorize_view(
    item: &ScheduledItem,
    now: DateTime<Utc>,
    is_privileged_viewer: bool,
) -> ViewDecision {
    if is_privileged_viewer {
        return ViewDecision::Allow;
    }
    if classify(item, now).is_denied() {
        ViewDecision::DenyWithRedirect { status: NOT_FOUND_STATUS }
    } else {
        ViewDecision::Allow
    }
}
