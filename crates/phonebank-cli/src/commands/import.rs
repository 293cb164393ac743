use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use phonebank_import::{spawn_merge, ImportKind};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// CSV, XLSX or legacy XLS file to merge into the contact table.
    pub file: PathBuf,
    /// Declared file kind (csv|xlsx|xls, or a MIME type); overrides the
    /// extension.
    #[arg(long)]
    pub kind: Option<String>,
}

fn resolve_kind(file_name: &str, declared: Option<&str>) -> Result<ImportKind> {
    match declared {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ImportKind::Csv),
            "xlsx" => Ok(ImportKind::Xlsx),
            "xls" => Ok(ImportKind::Xls),
            _ => Ok(ImportKind::from_content_type(raw)?),
        },
        None => Ok(ImportKind::from_file_name(file_name)?),
    }
}

pub async fn import_file(ctx: &Context, args: ImportArgs) -> Result<()> {
    let name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let kind = resolve_kind(name, args.kind.as_deref())?;

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("read {}", args.file.display()))?;

    let ticket = spawn_merge(ctx.store.clone(), bytes, kind);
    if ctx.json {
        print_json(&serde_json::json!({
            "accepted": true,
            "kind": ticket.kind,
            "size_bytes": ticket.size_bytes,
        }))?;
    } else {
        println!(
            "accepted {} ({} bytes), merging in background",
            args.file.display(),
            ticket.size_bytes
        );
    }
    // The process would kill the detached merge on exit; wait it out. The
    // outcome itself stays log-only.
    ticket.finished().await;
    Ok(())
}
