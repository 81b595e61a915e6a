mod config;
mod replay;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use debugger_store::Store;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::replay::{ReplayReport, Snapshot};

#[derive(Serialize)]
struct Output {
    report: ReplayReport,
    snapshot: Snapshot,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debugger_replay=info,debugger_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from_env()?;
    let action_log = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or(config.action_log.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no action log given: pass a path or set DEBUGGER_ACTION_LOG")
        })?;
    info!(path = %action_log.display(), "replaying action log");

    let file = File::open(&action_log)
        .with_context(|| format!("failed to open action log {}", action_log.display()))?;
    let actions = replay::read_actions(BufReader::new(file))?;

    let mut store = Store::new(&config.store);
    let report = replay::replay(&mut store, actions);
    info!(
        applied = report.applied,
        follow_ups = report.follow_ups,
        rejected = report.rejected.len(),
        "replay finished"
    );

    let output = Output {
        report,
        snapshot: Snapshot::of(store.state()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
