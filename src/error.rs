use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Unexpected worklog headers {found:?}. Expected Date, Start, End, Worked, Titles")]
    WorklogHeader { found: Vec<String> },

    #[error("Invalid worklog date '{value}' on row {row}: {source}")]
    WorklogDate {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid worklog duration '{value}' on row {row}. Expected H:MM (e.g., '7:30')")]
    WorklogDuration { row: usize, value: String },

    #[error("Worklog row {row} has {fields} field(s), expected 5")]
    WorklogRow { row: usize, fields: usize },

    #[error("Failed to read worklog: {0}")]
    WorklogCsv(#[from] csv::Error),

    #[error("No rates specified. Use --rate <amount> to set at least one rate.")]
    NoRates,

    #[error("Failed to read logo {path}: {source}")]
    LogoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode logo {path}: {source}")]
    LogoDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid logo size {0}. Must be greater than 0")]
    InvalidLogoSize(f64),

    #[error("Failed to generate PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported config format {0}. Use a .toml or .json file")]
    UnsupportedConfigFormat(PathBuf),

    #[error("Invalid detail '{0}'. Expected 'key=value' (e.g., 'VAT=GB123')")]
    InvalidDetail(String),

    #[error("Due date {0} days after the invoice date is out of range")]
    DueDateOutOfRange(i64),

    #[error("Config file already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

/// Which stage of the pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input; nothing was rendered.
    Validation,
    /// The logo could not be loaded; no page was finalized.
    Asset,
    /// The drawing backend or output sink failed.
    Render,
    Config,
}

impl InvoiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InvoiceError::WorklogHeader { .. }
            | InvoiceError::WorklogDate { .. }
            | InvoiceError::WorklogDuration { .. }
            | InvoiceError::WorklogRow { .. }
            | InvoiceError::WorklogCsv(_)
            | InvoiceError::NoRates => ErrorKind::Validation,
            InvoiceError::LogoRead { .. }
            | InvoiceError::LogoDecode { .. }
            | InvoiceError::InvalidLogoSize(_) => ErrorKind::Asset,
            InvoiceError::Pdf(_) | InvoiceError::Io(_) => ErrorKind::Render,
            InvoiceError::ConfigFileNotFound(_)
            | InvoiceError::ConfigParse { .. }
            | InvoiceError::ConfigJson { .. }
            | InvoiceError::UnsupportedConfigFormat(_)
            | InvoiceError::InvalidDetail(_)
            | InvoiceError::DueDateOutOfRange(_)
            | InvoiceError::AlreadyInitialized(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
