use crate::commands::Context;
use anyhow::{Context as _, Result};
use chrono::{Duration as ChronoDuration, Utc};
use clap::Args;
use phonebank_store::backup::BackupPolicy;
use phonebank_store::{backup, paths};
use std::time::Duration;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Override the configured snapshot interval, in minutes.
    #[arg(long)]
    pub interval: Option<i64>,
}

/// Periodic snapshot loop. Polls every second so interval changes between
/// runs take effect without drift; runs until the process is stopped.
pub async fn run_scheduler(ctx: &Context, args: RunArgs) -> Result<()> {
    let interval_minutes = args.interval.unwrap_or(ctx.config.backup.interval_minutes);
    if interval_minutes < 1 {
        return Err(crate::error::invalid_input("interval must be at least 1"));
    }

    let policy = BackupPolicy {
        interval: ChronoDuration::minutes(interval_minutes),
        retain: ctx.config.backup.retain,
    };
    let table_path = ctx.store.table_path().to_path_buf();
    let backup_dir = paths::backup_dir_for(&table_path);

    info!(
        interval_minutes,
        dir = %backup_dir.display(),
        "backup scheduler started"
    );

    let mut last_run = None;
    loop {
        let now = Utc::now();
        if policy.is_due(last_run, now) {
            match backup::snapshot(&table_path, &backup_dir, now)
                .with_context(|| "periodic snapshot")
            {
                Ok(_) => {
                    if let Some(retain) = policy.retain {
                        if let Err(err) = backup::prune(&backup_dir, retain) {
                            warn!(error = %err, "snapshot prune failed");
                        }
                    }
                }
                Err(err) => warn!(error = %err, "periodic snapshot failed"),
            }
            last_run = Some(now);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
