//! Reference routing collaborator.
//!
//! Turns a pure `ViewDecision` into what a request handler does with it:
//! - the denied item is the one the request addresses → redirect with 404,
//! - the denied item merely shows up in a listing → omit it silently.
//!
//! Redirect target: the configured error page, else `<item link>-404`.
//!
//! Back-office requests are not gated at all, matching `QueryContext::admin_context`
//! on the listing side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::{authorize_view, ViewDecision};
use crate::item::ScheduledItem;
use crate::metrics::{self, METRICS};

/// Per-request facts the caller already knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Id of the item the request navigates to, if any.
    pub addressed_id: Option<String>,
    pub error_page_link: Option<String>,
    /// Administrative back-office request; every item is visible.
    pub admin_context: bool,
}

impl RequestContext {
    pub fn addressing(id: impl Into<String>) -> Self {
        Self { addressed_id: Some(id.into()), ..Self::default() }
    }

    pub fn in_admin(mut self) -> Self {
        self.admin_context = true;
        self
    }

    pub fn with_error_page(mut self, link: impl Into<String>) -> Self {
        self.error_page_link = Some(link.into());
        self
    }

    pub fn is_addressed(&self, item: &ScheduledItem) -> bool {
        self.addressed_id.as_deref() == Some(item.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ViewOutcome {
    Visible,
    Hidden,
    Redirect { location: String, status: u16 },
}

/// Fallback redirect target when no error page is configured.
pub fn fallback_not_found_link(item: &ScheduledItem) -> String {
    format!("{}-404", item.link_or_default().trim_end_matches('/'))
}

pub fn resolve_view(
    item: &ScheduledItem,
    now: DateTime<Utc>,
    is_privileged_viewer: bool,
    ctx: &RequestContext,
) -> ViewOutcome {
    if ctx.admin_context {
        log::trace!("item {} requested from back office; not gated", item.id);
        METRICS.inc(metrics::VIEW_BYPASSED, 1);
        return ViewOutcome::Visible;
    }
    match authorize_view(item, now, is_privileged_viewer) {
        ViewDecision::Allow => {
            let key = if is_privileged_viewer {
                metrics::VIEW_BYPASSED
            } else {
                metrics::VIEW_ALLOWED
            };
            METRICS.inc(key, 1);
            ViewOutcome::Visible
        }
        ViewDecision::DenyWithRedirect { status } => {
            METRICS.inc(metrics::VIEW_DENIED, 1);
            if ctx.is_addressed(item) {
                let location = match &ctx.error_page_link {
                    Some(link) => link.clone(),
                    None => fallback_not_found_link(item),
                };
                log::debug!(
                    "item {} outside its window; redirecting to {} ({})",
                    item.id,
                    location,
                    status
                );
                METRICS.inc(metrics::VIEW_REDIRECTED, 1);
                ViewOutcome::Redirect { location, status }
            } else {
                log::trace!("item {} outside its window; hidden from listing", item.id);
                METRICS.inc(metrics::VIEW_HIDDEN, 1);
                ViewOutcome::Hidden
            }
        }
    }
}

/// Items a viewer may see, in input order. Denied items are dropped.
pub fn visible_items<'a, I>(
    items: I,
    now: DateTime<Utc>,
    is_privileged_viewer: bool,
) -> Vec<&'a ScheduledItem>
where
    I: IntoIterator<Item = &'a ScheduledItem>,
{
    let listing = RequestContext::default();
    items
        .into_iter()
        .filter(|item| {
            resolve_view(item, now, is_privileged_viewer, &listing) == ViewOutcome::Visible
        })
        .collect()
}
