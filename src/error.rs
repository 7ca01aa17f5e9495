use std::path::PathBuf;

/// Recoverable failures of the library.
///
/// Shape mismatches and other caller mistakes are not represented here; they
/// panic at the call site, the same way the `Matrix` operators do.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: '{token}' is not a valid number")]
    Parse { line: usize, token: String },

    #[error("line {line}: expected {expected} columns, got {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: label {value} is not a non-negative integer")]
    Label { line: usize, value: f64 },

    #[error("dataset contains no data rows")]
    Empty,

    #[error("dataset needs at least 2 columns (features + label), got {0}")]
    TooFewColumns(usize),

    #[error("matrix is singular")]
    Singular,

    #[error("invalid model spec: {0}")]
    Spec(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
