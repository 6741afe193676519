use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PedidosError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("failed to write spreadsheet: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
