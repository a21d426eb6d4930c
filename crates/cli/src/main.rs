//! timegate CLI
//!
//! Commands:
//!   1) classify --item <item.json>
//!      - Temporal state, flags, label and badges of one item.
//!   2) authorize --item <item.json> [--privileged] [--addressed] [--admin] [--config <gate.toml>]
//!      - Gate verdict plus what a request handler would do with it.
//!   3) filter --items <items.json> [--stage live|draft] [--can-view-drafts] [--admin]
//!      - Ids passing the bulk listing predicate.
//!   4) metrics
//!      - Counter CSV schema.
//!
//! "now" is `--now <RFC3339>` when given, else TIMEGATE_TIME_MS, else
//! SOURCE_DATE_EPOCH, else the wall clock.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "timegate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Clone, Copy, ValueEnum)]
enum StageArg {
    Live,
    Draft,
}

#[derive(Subcommand)]
enum Cmd {
    /// Classify one item and print its status labels
    Classify {
        /// JSON file holding one item
        #[arg(long)]
        item: PathBuf,
        /// Evaluation instant (RFC 3339)
        #[arg(long)]
        now: Option<String>,
    },

    /// Decide whether one item may be viewed
    Authorize {
        #[arg(long)]
        item: PathBuf,
        #[arg(long)]
        now: Option<String>,
        /// Caller holds the draft-view permission
        #[arg(long)]
        privileged: bool,
        /// The request navigates to this item (not a listing)
        #[arg(long)]
        addressed: bool,
        /// Back-office request; never gated
        #[arg(long)]
        admin: bool,
        /// Gate config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Apply the bulk listing predicate to a JSON array of items
    Filter {
        #[arg(long)]
        items: PathBuf,
        #[arg(long)]
        now: Option<String>,
        #[arg(long, value_enum, default_value = "live")]
        stage: StageArg,
        #[arg(long)]
        can_view_drafts: bool,
        /// Back-office request; never filtered
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the counter CSV (header + zero row)
    Metrics,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Classify { item, now } => commands::cmd_classify(&item, now.as_deref())?,
        Cmd::Authorize { item, now, privileged, addressed, admin, config } => {
            let access = commands::Access { privileged, addressed, admin };
            commands::cmd_authorize(&item, now.as_deref(), access, config.as_deref())?
        }
        Cmd::Filter { items, now, stage, can_view_drafts, admin, config } => {
            let stage = match stage {
                StageArg::Live => timegate_core::Stage::Live,
                StageArg::Draft => timegate_core::Stage::Draft,
            };
            let ctx = timegate_core::QueryContext { stage, can_view_drafts, admin_context: admin };
            commands::cmd_filter(&items, now.as_deref(), ctx, config.as_deref())?
        }
        Cmd::Metrics => commands::cmd_metrics(),
    }
    Ok(())
}
