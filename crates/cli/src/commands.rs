use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::json;

use timegate_core::clock::deterministic_now;
use timegate_core::config::GateConfig;
use timegate_core::metrics::{self, METRICS};
use timegate_core::routing::{resolve_view, RequestContext};
use timegate_core::{
    authorize_view, classify, filter_for, schedule_badges, status_flags, status_label, QueryContext,
    ScheduledItem,
};

fn resolve_now(flag: Option<&str>) -> Result<DateTime<Utc>> {
    match flag {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("--now {s:?} is not RFC 3339"))?
            .with_timezone(&Utc)),
        None => Ok(deterministic_now()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("{}: not a valid item document", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<GateConfig> {
    match path {
        Some(p) => GateConfig::load_from_file(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(GateConfig::default()),
    }
}

pub fn cmd_classify(item_path: &Path, now: Option<&str>) -> Result<()> {
    let item: ScheduledItem = read_json(item_path)?;
    let now = resolve_now(now)?;
    let state = classify(&item, now);

    let out = json!({
        "id": item.id,
        "now": now,
        "state": state,
        "flags": status_flags(state),
        "label": status_label(&item, state),
        "badges": schedule_badges(&item, now),
    });
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

/// Caller facts for `authorize`.
#[derive(Debug, Clone, Copy)]
pub struct Access {
    pub privileged: bool,
    pub addressed: bool,
    pub admin: bool,
}

pub fn cmd_authorize(
    item_path: &Path,
    now: Option<&str>,
    access: Access,
    config: Option<&Path>,
) -> Result<()> {
    let item: ScheduledItem = read_json(item_path)?;
    let now = resolve_now(now)?;
    let cfg = load_config(config)?;

    let ctx = RequestContext {
        addressed_id: access.addressed.then(|| item.id.clone()),
        error_page_link: cfg.error_page_link.clone(),
        admin_context: access.admin,
    };
    let decision = authorize_view(&item, now, access.privileged);
    let outcome = resolve_view(&item, now, access.privileged, &ctx);
    log::debug!("authorize {} at {}: {:?} -> {:?}", item.id, now, decision, outcome);

    let out = json!({
        "id": item.id,
        "now": now,
        "verdict": decision,
        "action": outcome,
    });
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

pub fn cmd_filter(
    items_path: &Path,
    now: Option<&str>,
    ctx: QueryContext,
    config: Option<&Path>,
) -> Result<()> {
    let items: Vec<ScheduledItem> = read_json(items_path)?;
    let now = resolve_now(now)?;
    let cfg = load_config(config)?;

    let ids: Vec<&str> = match filter_for(&ctx, now) {
        Some(pred) => {
            let frag = pred.to_sql(&cfg.columns);
            log::debug!("listing filter: {} with {:?}", frag.sql, frag.params);
            let kept: Vec<&str> =
                items.iter().filter(|i| pred.matches(i)).map(|i| i.id.as_str()).collect();
            METRICS.inc(metrics::ITEMS_FILTERED, (items.len() - kept.len()) as u64);
            kept
        }
        None => {
            log::debug!("listing filter not applied for this context");
            items.iter().map(|i| i.id.as_str()).collect()
        }
    };
    println!("{}", serde_json::to_string(&ids)?);
    Ok(())
}

pub fn cmd_metrics() {
    METRICS.register_all();
    println!("{}", METRICS.snapshot_csv());
}
