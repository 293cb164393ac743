use crate::commands::Context;
use anyhow::{Context as _, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Emit the raw table encoding instead of CSV.
    #[arg(long)]
    pub raw: bool,
}

pub fn export(ctx: &Context, args: ExportArgs) -> Result<()> {
    if args.raw {
        let bytes = ctx.store.export_table()?;
        let out = args
            .out
            .ok_or_else(|| crate::error::invalid_input("--raw requires --out"))?;
        fs::write(&out, bytes).with_context(|| format!("write {}", out.display()))?;
        println!("table written to {}", out.display());
        return Ok(());
    }

    let csv = ctx.store.export_csv()?;
    match args.out {
        Some(out) => {
            fs::write(&out, csv).with_context(|| format!("write {}", out.display()))?;
            println!("contacts exported to {}", out.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
