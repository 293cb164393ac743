use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonebank";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BACKUP_INTERVAL_MINUTES: i64 = 30;
pub const DEFAULT_DISPLAY_OFFSET_MINUTES: i32 = 120;
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_KEY_TIMEOUT_SECS: u64 = 5;

// FixedOffset bound: UTC-14h..UTC+14h.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backup: BackupConfig,
    pub device: DeviceConfig,
    /// Fixed offset from UTC, in minutes, used when writing call-history
    /// date/time columns.
    pub display_offset_minutes: i32,
}

#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub interval_minutes: i64,
    /// `None` keeps every snapshot.
    pub retain: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// The device-control executable; resolved via PATH when not absolute.
    pub tool_path: String,
    pub command_timeout_secs: u64,
    pub verify_timeout_secs: u64,
    pub key_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backup: BackupConfig {
                interval_minutes: DEFAULT_BACKUP_INTERVAL_MINUTES,
                retain: None,
            },
            device: DeviceConfig {
                tool_path: "adb".to_string(),
                command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
                verify_timeout_secs: DEFAULT_VERIFY_TIMEOUT_SECS,
                key_timeout_secs: DEFAULT_KEY_TIMEOUT_SECS,
            },
            display_offset_minutes: DEFAULT_DISPLAY_OFFSET_MINUTES,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid backup interval_minutes value: {0}")]
    InvalidBackupInterval(i64),
    #[error("invalid backup retain value: {0}")]
    InvalidBackupRetain(usize),
    #[error("invalid display_offset_minutes value: {0}")]
    InvalidDisplayOffset(i32),
    #[error("invalid device timeout value: {0}")]
    InvalidDeviceTimeout(u64),
    #[error("device tool_path cannot be empty")]
    EmptyToolPath,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    display_offset_minutes: Option<i32>,
    backup: Option<BackupFile>,
    device: Option<DeviceFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BackupFile {
    interval_minutes: Option<i64>,
    retain: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceFile {
    tool_path: Option<String>,
    command_timeout_secs: Option<u64>,
    verify_timeout_secs: Option<u64>,
    key_timeout_secs: Option<u64>,
}

/// Loads the configuration. A custom path must exist; the default location
/// falls back to `AppConfig::default()` when absent.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };

    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path));
        }
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    merge(file)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn merge(file: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(offset) = file.display_offset_minutes {
        if offset.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::InvalidDisplayOffset(offset));
        }
        config.display_offset_minutes = offset;
    }

    if let Some(backup) = file.backup {
        if let Some(minutes) = backup.interval_minutes {
            if minutes < 1 {
                return Err(ConfigError::InvalidBackupInterval(minutes));
            }
            config.backup.interval_minutes = minutes;
        }
        if let Some(retain) = backup.retain {
            if retain == 0 {
                return Err(ConfigError::InvalidBackupRetain(retain));
            }
            config.backup.retain = Some(retain);
        }
    }

    if let Some(device) = file.device {
        if let Some(tool_path) = device.tool_path {
            if tool_path.trim().is_empty() {
                return Err(ConfigError::EmptyToolPath);
            }
            config.device.tool_path = tool_path;
        }
        for value in [
            device.command_timeout_secs,
            device.verify_timeout_secs,
            device.key_timeout_secs,
        ]
        .into_iter()
        .flatten()
        {
            if value == 0 {
                return Err(ConfigError::InvalidDeviceTimeout(value));
            }
        }
        if let Some(value) = device.command_timeout_secs {
            config.device.command_timeout_secs = value;
        }
        if let Some(value) = device.verify_timeout_secs {
            config.device.verify_timeout_secs = value;
        }
        if let Some(value) = device.key_timeout_secs {
            config.device.key_timeout_secs = value;
        }
    }

    Ok(config)
}
