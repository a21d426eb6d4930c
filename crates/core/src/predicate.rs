//! Bulk visibility predicate for listing queries.
//!
//! Expression: `(embargo IS NULL OR embargo < now) AND (expiry IS NULL OR expiry > now)`.
//!
//! Both comparisons are strict, unlike `gate::classify` which treats the
//! embargo instant itself as visible. At `now == embargo` this predicate
//! excludes an item the single-item path reports `Active`. The operators are
//! kept as they are; see DESIGN.md before reconciling them.
//!
//! `published` is not part of the expression. Publication state is already
//! implied by the stage the storage layer reads from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ColumnNames;
use crate::item::ScheduledItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityPredicate {
    pub now: DateTime<Utc>,
}

pub fn visibility_predicate(now: DateTime<Utc>) -> VisibilityPredicate {
    VisibilityPredicate { now }
}

/// Query fragment with positional `?` placeholders. `params` are bound in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<DateTime<Utc>>,
}

impl VisibilityPredicate {
    /// In-memory evaluation, identical to the SQL expression.
    pub fn matches(&self, item: &ScheduledItem) -> bool {
        let embargo_ok = item.embargo_at.map_or(true, |e| e < self.now);
        let expiry_ok = item.expiry_at.map_or(true, |x| x > self.now);
        embargo_ok && expiry_ok
    }

    pub fn to_sql(&self, columns: &ColumnNames) -> SqlFragment {
        let e = quote_ident(&columns.embargo);
        let x = quote_ident(&columns.expiry);
        SqlFragment {
            sql: format!("({e} IS NULL OR {e} < ?) AND ({x} IS NULL OR {x} > ?)"),
            params: vec![self.now, self.now],
        }
    }
}

/// ANSI double-quoted identifier; embedded quotes are doubled.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Versioned stage a listing query reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Live,
    Draft,
}

/// Facts about the query's caller that decide whether filtering applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    pub stage: Stage,
    pub can_view_drafts: bool,
    /// Administrative back-office request; never filtered.
    pub admin_context: bool,
}

/// Predicate to inject into a listing query, if any.
///
/// Admin contexts are never filtered. Otherwise the live stage is always
/// filtered, and the draft stage only for callers without draft access.
pub fn filter_for(ctx: &QueryContext, now: DateTime<Utc>) -> Option<VisibilityPredicate> {
    if ctx.admin_context {
        return None;
    }
    if ctx.stage == Stage::Live || !ctx.can_view_drafts {
        Some(visibility_predicate(now))
    } else {
        None
    }
}
