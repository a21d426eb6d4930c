//! Embargo/expiry visibility gate for scheduled content.
//!
//! Pure core: `item`, `gate`, `status`, `predicate`.
//! Collaborator helpers: `routing`, `clock`, `config`, `metrics`.

pub mod item;
pub mod gate;
pub mod status;
pub mod predicate;

pub mod clock;
pub mod config;
pub mod metrics;
pub mod routing;

pub use gate::{authorize_view, classify, TemporalState, ViewDecision, NOT_FOUND_STATUS};
pub use item::ScheduledItem;
pub use predicate::{filter_for, visibility_predicate, QueryContext, Stage, VisibilityPredicate};
pub use status::{schedule_badges, status_flags, status_label, LabelKind, StatusFlag, StatusLabel};
