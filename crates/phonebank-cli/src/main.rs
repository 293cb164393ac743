mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

use crate::commands::{autosave, backup, call, contacts, export, import, scheduler, Context};
use crate::error::{exit_code_for, report_error};
use phonebank_config as config;
use phonebank_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "phonebank", version, about = "phonebank CLI")]
struct Cli {
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(name = "add-contact")]
    AddContact(contacts::AddContactArgs),
    #[command(name = "edit-contact")]
    EditContact(contacts::EditContactArgs),
    Show(contacts::ShowArgs),
    List(contacts::ListArgs),
    Delete(contacts::DeleteArgs),
    #[command(name = "delete-all")]
    DeleteAll(contacts::DeleteAllArgs),
    Import(import::ImportArgs),
    Export(export::ExportArgs),
    Call(call::CallArgs),
    #[command(name = "end-call")]
    EndCall(call::EndCallArgs),
    #[command(name = "hang-up")]
    HangUp(call::HangUpArgs),
    #[command(name = "call-status")]
    CallStatus(call::CallStatusArgs),
    #[command(subcommand)]
    Device(call::DeviceCommand),
    Backup(backup::BackupArgs),
    Run(scheduler::RunArgs),
    #[command(subcommand)]
    Autosave(autosave::AutosaveCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_dir,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let table_path =
        paths::resolve_table_path(data_dir).with_context(|| "resolve contact table path")?;
    if verbose {
        debug!(path = %table_path.display(), "contact table path resolved");
    }

    let ctx = Context {
        store: Arc::new(Store::open(table_path)),
        json,
        config: app_config,
    };

    match command {
        Command::AddContact(args) => contacts::add_contact(&ctx, args),
        Command::EditContact(args) => contacts::edit_contact(&ctx, args),
        Command::Show(args) => contacts::show_contact(&ctx, args),
        Command::List(args) => contacts::list_contacts(&ctx, args),
        Command::Delete(args) => contacts::delete_contact(&ctx, args),
        Command::DeleteAll(args) => contacts::delete_all_contacts(&ctx, args),
        Command::Import(args) => import::import_file(&ctx, args).await,
        Command::Export(args) => export::export(&ctx, args),
        Command::Call(args) => call::start_call(&ctx, args).await,
        Command::EndCall(args) => call::end_call(&ctx, args).await,
        Command::HangUp(args) => call::hang_up(&ctx, args).await,
        Command::CallStatus(args) => call::call_status(&ctx, args).await,
        Command::Device(cmd) => call::device(&ctx, cmd).await,
        Command::Backup(args) => backup::backup_now(&ctx, args),
        Command::Run(args) => scheduler::run_scheduler(&ctx, args).await,
        Command::Autosave(cmd) => match cmd {
            autosave::AutosaveCommand::Save(args) => autosave::save(&ctx, args),
            autosave::AutosaveCommand::Load(args) => autosave::load(&ctx, args),
            autosave::AutosaveCommand::Exists(args) => autosave::exists(&ctx, args),
        },
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
