use thiserror::Error;

/// Failures of the surrounding shell. Ledger edits themselves never fail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No document form is open")]
    NoActiveForm,

    #[error("Unknown document kind: {0}")]
    UnknownDocumentKind(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Cannot add {requested} rows at once (at most {max})")]
    TooManyRows { requested: usize, max: usize },

    #[error("Invalid VAT rate: {0}")]
    InvalidVatRate(String),

    #[error("Invalid VAT mode: {0}")]
    InvalidVatMode(String),

    #[error("Unsupported estimate file '{file}': expected .xlsx, .xls, .csv or .txt")]
    UnsupportedUpload { file: String },

    #[error("Invalid event on line {line}: {message}")]
    InvalidEvent { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
