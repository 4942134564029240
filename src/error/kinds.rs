use std::{fmt, io};

/// Crate-wide `Result` type using [`SheetportError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, SheetportError>;

/// Top-level error type for sheetport operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum SheetportError {
    /// Spreadsheet export errors.
    Export(ExportError),

    /// Input (CSV) reading errors.
    Input(InputError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Export-specific errors.
#[derive(Debug)]
pub enum ExportError {
    /// Workbook or worksheet operation failed.
    Workbook(rust_xlsxwriter::XlsxError),

    /// Column widths could not be computed for auto-fit.
    ColumnSizing(String),

    /// Launching the platform open handler failed.
    OpenFailed(String),
}

/// Input-reading errors for the CLI front end.
#[derive(Debug)]
pub enum InputError {
    /// CSV parsing failed.
    Csv(csv::Error),

    /// Input file holds no header row.
    EmptyInput(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for SheetportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetportError::Export(e) => write!(f, "Export error: {e}"),
            SheetportError::Input(e) => write!(f, "Input error: {e}"),
            SheetportError::Config(e) => write!(f, "Configuration error: {e}"),
            SheetportError::Io(e) => write!(f, "I/O error: {e}"),
            SheetportError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Workbook(e) => write!(f, "Workbook operation failed: {e}"),
            ExportError::ColumnSizing(msg) => write!(f, "Column sizing failed: {msg}"),
            ExportError::OpenFailed(msg) => write!(f, "Failed to open exported file: {msg}"),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Csv(e) => write!(f, "CSV parsing failed: {e}"),
            InputError::EmptyInput(path) => write!(f, "No header row in input file: {path}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for SheetportError {}
impl std::error::Error for ExportError {}
impl std::error::Error for InputError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to SheetportError ========================= */

impl From<io::Error> for SheetportError {
    fn from(err: io::Error) -> Self {
        SheetportError::Io(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SheetportError::Export(ExportError::Workbook(err))
    }
}

impl From<csv::Error> for SheetportError {
    fn from(err: csv::Error) -> Self {
        SheetportError::Input(InputError::Csv(err))
    }
}

impl From<ExportError> for SheetportError {
    fn from(err: ExportError) -> Self {
        SheetportError::Export(err)
    }
}

impl From<InputError> for SheetportError {
    fn from(err: InputError) -> Self {
        SheetportError::Input(err)
    }
}

impl From<ConfigError> for SheetportError {
    fn from(err: ConfigError) -> Self {
        SheetportError::Config(err)
    }
}

impl From<String> for SheetportError {
    fn from(msg: String) -> Self {
        SheetportError::Generic(msg)
    }
}

impl From<&str> for SheetportError {
    fn from(msg: &str) -> Self {
        SheetportError::Generic(msg.to_owned())
    }
}
