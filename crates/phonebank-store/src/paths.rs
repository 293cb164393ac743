use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "phonebank";
const TABLE_FILENAME: &str = "contacts.bin";
const BACKUP_DIRNAME: &str = "backups";
const AUTOSAVE_DIRNAME: &str = "autosave";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    restrict_dir_permissions(&dir)?;
    Ok(dir)
}

pub fn table_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join(TABLE_FILENAME))
}

pub fn table_path_in(dir: &Path) -> PathBuf {
    dir.join(TABLE_FILENAME)
}

/// Resolves the table path, honoring an explicit data directory override.
pub fn resolve_table_path(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => {
            if dir.as_os_str().is_empty() {
                return Err(StoreError::InvalidDataPath(dir));
            }
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
            }
            Ok(table_path_in(&dir))
        }
        None => table_path(),
    }
}

pub fn backup_dir_for(table_path: &Path) -> PathBuf {
    parent_of(table_path).join(BACKUP_DIRNAME)
}

pub fn autosave_dir_for(table_path: &Path) -> PathBuf {
    parent_of(table_path).join(AUTOSAVE_DIRNAME)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o700);
    fs::set_permissions(dir, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}
