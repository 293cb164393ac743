use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("table codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("contact not found: {0}")]
    NotFound(String),
    #[error("a contact with email {0} already exists")]
    DuplicateEmail(String),
    #[error("a contact named {0} already exists")]
    DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Codec,
    Csv,
    MissingHomeDir,
    InvalidDataPath,
    NotFound,
    DuplicateEmail,
    DuplicateName,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Codec(_) => StoreErrorKind::Codec,
            StoreError::Csv(_) => StoreErrorKind::Csv,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::DuplicateEmail(_) => StoreErrorKind::DuplicateEmail,
            StoreError::DuplicateName(_) => StoreErrorKind::DuplicateName,
        }
    }
}
