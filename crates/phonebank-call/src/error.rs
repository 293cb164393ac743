use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device-control tool not found: {0}")]
    ToolMissing(String),
    #[error("device command failed (exit code {code:?}): {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
    #[error("device command timed out after {0:?}")]
    Timeout(Duration),
    #[error("unparseable device output: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
    #[error("not a dialable number: {0:?}")]
    InvalidNumber(String),
}

pub type Result<T> = std::result::Result<T, CallError>;
