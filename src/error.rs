use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("could not open XLSX file {}: {source}", path.display())]
    OpenWorkbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("could not open CSV file {}: {source}", path.display())]
    OpenCsv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create CSV file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read XLSX sheet '{sheet}': {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("could not read CSV file (record {record}): {source}")]
    Parse {
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("could not write CSV file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not create XLSX sheet '{name}': {source}")]
    Sheet {
        name: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("could not save XLSX file {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Unsupported format '{0}'. Use 'csv' or 'xlsx'.")]
    UnsupportedFormat(String),

    #[error("Usage: sheetconv -f <format> -o <output_filename> <input_filename> ({0})")]
    Usage(String),
}

impl ConvertError {
    /// Short label of the stage that failed, used in log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            ConvertError::OpenWorkbook { .. } | ConvertError::OpenCsv { .. } => "open",
            ConvertError::Create { .. } => "create",
            ConvertError::Read { .. } | ConvertError::Parse { .. } => "read",
            ConvertError::Write { .. } => "write",
            ConvertError::Sheet { .. } | ConvertError::Save { .. } => "save",
            ConvertError::UnsupportedFormat(_) | ConvertError::Usage(_) => "usage",
        }
    }
}
