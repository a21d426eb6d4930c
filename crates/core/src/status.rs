//! Structured status labels for the presentation layer.
//!
//! Nothing here renders markup or translated text. Flags and labels are
//! stable keys a caller maps onto its own badges, icons and strings.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::TemporalState;
use crate::item::ScheduledItem;

/// Additive flag attached to an item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFlag {
    Scheduled,
    Expired,
}

impl StatusFlag {
    pub fn key(&self) -> &'static str {
        match self {
            StatusFlag::Scheduled => "scheduled",
            StatusFlag::Expired => "expired",
        }
    }
}

pub fn status_flags(state: TemporalState) -> BTreeSet<StatusFlag> {
    let mut flags = BTreeSet::new();
    match state {
        TemporalState::PendingEmbargo => {
            flags.insert(StatusFlag::Scheduled);
        }
        TemporalState::Expired => {
            flags.insert(StatusFlag::Expired);
        }
        TemporalState::Active | TemporalState::Unpublished => {}
    }
    flags
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelKind {
    Scheduled,
    WillExpire,
    Expired,
    None,
}

/// Single label derived from the authorization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabel {
    pub kind: LabelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
}

impl StatusLabel {
    pub fn none() -> Self {
        Self { kind: LabelKind::None, at: None }
    }
}

pub fn status_label(item: &ScheduledItem, state: TemporalState) -> StatusLabel {
    match state {
        TemporalState::PendingEmbargo => {
            StatusLabel { kind: LabelKind::Scheduled, at: item.embargo_at }
        }
        TemporalState::Expired => {
            StatusLabel { kind: LabelKind::Expired, at: item.expiry_at }
        }
        TemporalState::Active if item.expiry_at.is_some() => {
            StatusLabel { kind: LabelKind::WillExpire, at: item.expiry_at }
        }
        _ => StatusLabel::none(),
    }
}

/// One badge per populated field. Embargo and expiry are judged separately,
/// each against its own instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "badge", rename_all = "kebab-case")]
pub enum ScheduleBadge {
    EmbargoActive { at: DateTime<Utc> },
    EmbargoPassed { at: DateTime<Utc> },
    ExpiryPending { at: DateTime<Utc> },
    ExpiryReached { at: DateTime<Utc> },
}

/// Embargo badge first, then expiry badge. Drafts get none.
pub fn schedule_badges(item: &ScheduledItem, now: DateTime<Utc>) -> Vec<ScheduleBadge> {
    let mut out = Vec::with_capacity(2);
    if let Some(at) = item.embargo_at.filter(|_| item.embargo_is_set()) {
        out.push(if at > now {
            ScheduleBadge::EmbargoActive { at }
        } else {
            ScheduleBadge::EmbargoPassed { at }
        });
    }
    if let Some(at) = item.expiry_at.filter(|_| item.expiry_is_set()) {
        out.push(if at <= now {
            ScheduleBadge::ExpiryReached { at }
        } else {
            ScheduleBadge::ExpiryPending { at }
        });
    }
    out
}
