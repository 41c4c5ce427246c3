use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Parse error at line {line}, column {column}: cannot read {value:?}")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Header mismatch: expected {expected}, found {found}")]
    HeaderMismatch { expected: String, found: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
