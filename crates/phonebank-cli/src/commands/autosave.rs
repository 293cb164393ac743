use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use phonebank_store::autosave::AutosaveArea;
use phonebank_store::paths;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum AutosaveCommand {
    /// Store a CSV snapshot under the autosave area.
    Save(SaveArgs),
    /// Print a previously saved snapshot.
    Load(LoadArgs),
    /// Check whether a snapshot exists.
    Exists(ExistsArgs),
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Name to save under, relative to the autosave area.
    pub name: String,
    /// CSV file to read; defaults to the current contact table export.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ExistsArgs {
    pub name: String,
}

fn area(ctx: &Context) -> AutosaveArea {
    AutosaveArea::new(paths::autosave_dir_for(ctx.store.table_path()))
}

pub fn save(ctx: &Context, args: SaveArgs) -> Result<()> {
    let csv = match &args.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        None => ctx.store.export_csv()?,
    };

    let written = area(ctx).save(&args.name, &csv)?;
    if ctx.json {
        print_json(&serde_json::json!({ "saved": written.display().to_string() }))?;
    } else {
        println!("saved to {}", written.display());
    }
    Ok(())
}

pub fn load(ctx: &Context, args: LoadArgs) -> Result<()> {
    let csv = area(ctx).load(&args.name)?;
    print!("{}", csv);
    Ok(())
}

pub fn exists(ctx: &Context, args: ExistsArgs) -> Result<()> {
    let exists = area(ctx).exists(&args.name);
    if ctx.json {
        print_json(&serde_json::json!({ "exists": exists }))?;
    } else {
        println!("{}", if exists { "yes" } else { "no" });
    }
    Ok(())
}
