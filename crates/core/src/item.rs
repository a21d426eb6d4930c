//! Scheduled content item as supplied by the storage collaborator.
//!
//! The gate only reads items. `embargo_at` and `expiry_at` are independent:
//! an embargo after the expiry is a misconfiguration, but still a valid item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One content item with its optional visibility window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    /// At least one live version exists.
    pub published: bool,
    /// Earliest visible instant; `None` = visible as soon as published.
    #[serde(default)]
    pub embargo_at: Option<DateTime<Utc>>,
    /// Instant at which the item stops being visible; `None` = never.
    #[serde(default)]
    pub expiry_at: Option<DateTime<Utc>>,
    /// Public link of the item, used for the fallback not-found redirect.
    #[serde(default)]
    pub link: Option<String>,
}

impl ScheduledItem {
    pub fn published(id: impl Into<String>) -> Self {
        Self { id: id.into(), published: true, embargo_at: None, expiry_at: None, link: None }
    }

    pub fn draft(id: impl Into<String>) -> Self {
        Self { published: false, ..Self::published(id) }
    }

    pub fn with_embargo(mut self, at: DateTime<Utc>) -> Self {
        self.embargo_at = Some(at);
        self
    }

    pub fn with_expiry(mut self, at: DateTime<Utc>) -> Self {
        self.expiry_at = Some(at);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Embargo set on a published item. Drafts never report it.
    pub fn embargo_is_set(&self) -> bool {
        self.published && self.embargo_at.is_some()
    }

    /// Expiry set on a published item. Drafts never report it.
    pub fn expiry_is_set(&self) -> bool {
        self.published && self.expiry_at.is_some()
    }

    /// Link used to build redirect targets; falls back to `/<id>`.
    pub fn link_or_default(&self) -> String {
        match &self.link {
            Some(l) => l.clone(),
            None => format!("/{}", self.id),
        }
    }
}
