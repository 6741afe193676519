use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a page carries no printed page number.
pub const MISSING_PAGE_LABEL: &str = "N/A";

/// A product code found in the product band of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCandidate {
    pub code: String,
    pub y: f64,
}

/// A bare integer found in the quantity band of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityCandidate {
    pub value: u64,
    pub y: f64,
}

/// One output row: a product, its matched quantity (0 when nothing aligned)
/// and the printed page label of the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRow {
    pub product: String,
    pub quantity: u64,
    pub page_label: String,
}

/// An extracted row with its 1-based position in the final batch output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedRow {
    pub index: usize,
    #[serde(flatten)]
    pub row: ExtractedRow,
}

/// Rows extracted from a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRows {
    pub page_label: String,
    pub rows: Vec<ExtractedRow>,
}

/// A named PDF buffer handed to the batch.
#[derive(Debug, Clone)]
pub struct PdfInput {
    /// Display name used in error messages (usually the file name).
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PdfInput {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        PdfInput {
            name: name.into(),
            bytes,
        }
    }
}

/// A file that could not be processed. The batch carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to process {}: {}", self.file, self.message)
    }
}
