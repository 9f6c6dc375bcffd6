use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BomError {
    #[error("BOM file not found: {path}")]
    FileNotFound { path: String },

    #[error("Unable to read {path} with the supported encodings (UTF-8, Windows-1252): {reason}")]
    UnreadableFile { path: String, reason: String },

    #[error("Failed to load sheet '{sheet}': {reason}\nAvailable sheets: {}", .available.join(", "))]
    SheetLoad {
        sheet: String,
        reason: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' not found. Available columns: {}", .available.join(", "))]
    ColumnNotFound { column: String, available: Vec<String> },

    #[error("Invalid delimiter '{value}': expected 'auto' or a single character")]
    InvalidDelimiter { value: String },

    #[error("No BOM file or part number supplied")]
    MissingInput,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl BomError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn sheet_load(
        sheet: impl Into<String>,
        reason: impl Into<String>,
        available: Vec<String>,
    ) -> Self {
        Self::SheetLoad {
            sheet: sheet.into(),
            reason: reason.into(),
            available,
        }
    }

    pub fn column_not_found(column: impl Into<String>, available: Vec<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            available,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::UnreadableFile { .. } => "UNREADABLE_FILE",
            Self::SheetLoad { .. } => "SHEET_LOAD_ERROR",
            Self::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            Self::InvalidDelimiter { .. } => "INVALID_DELIMITER",
            Self::MissingInput => "MISSING_INPUT",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

pub type BomResult<T> = Result<T, BomError>;

impl From<std::io::Error> for BomError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for BomError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
