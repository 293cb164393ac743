use phonebank_store::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported import file kind: {0}")]
    UnsupportedKind(String),
    #[error("no usable name column in the uploaded file")]
    NoNameColumn,
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet parse error: {0}")]
    Xlsx(#[from] calamine::XlsxError),
    #[error("legacy spreadsheet parse error: {0}")]
    Xls(#[from] calamine::XlsError),
    #[error("spreadsheet has no worksheet")]
    EmptyWorkbook,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
