use anyhow::Result;
use phonebank_config::AppConfig;
use phonebank_store::Store;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

pub mod autosave;
pub mod backup;
pub mod call;
pub mod contacts;
pub mod export;
pub mod import;
pub mod scheduler;

pub struct Context {
    pub store: Arc<Store>,
    pub json: bool,
    pub config: AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
