use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Args;
use phonebank_store::{backup, paths};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Snapshot directory; defaults to backups/ beside the table.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BackupReport {
    output: Option<String>,
    pruned: usize,
}

pub fn backup_now(ctx: &Context, args: BackupArgs) -> Result<()> {
    let table_path = ctx.store.table_path();
    let backup_dir = args
        .out_dir
        .unwrap_or_else(|| paths::backup_dir_for(table_path));

    let written = backup::snapshot(table_path, &backup_dir, Utc::now())
        .with_context(|| format!("snapshot table into {}", backup_dir.display()))?;

    let pruned = match ctx.config.backup.retain {
        Some(retain) => backup::prune(&backup_dir, retain)
            .with_context(|| format!("prune snapshots in {}", backup_dir.display()))?,
        None => 0,
    };

    if ctx.json {
        return print_json(&BackupReport {
            output: written.as_ref().map(|path| path.display().to_string()),
            pruned,
        });
    }

    match written {
        Some(path) => println!("snapshot written to {}", path.display()),
        None => println!("no contact table yet, nothing to back up"),
    }
    if pruned > 0 {
        println!("pruned {} old snapshot(s)", pruned);
    }
    Ok(())
}
