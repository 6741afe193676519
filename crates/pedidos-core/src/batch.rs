use crate::error::PedidosError;
use crate::extraction::PdfExtractor;
use crate::layout::Layout;
use crate::model::{ExtractedRow, FileError, IndexedRow, PdfInput};
use crate::page::extract_document;
use tracing::{debug, info, warn};

/// Rows from every file of a batch, plus the files that failed.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Rows in file order, then page order, then discovery order, indexed from 1.
    pub rows: Vec<IndexedRow>,
    /// One entry per file that could not be opened, in input order.
    pub errors: Vec<FileError>,
}

impl BatchResult {
    /// True when no product was found anywhere in the batch.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Extract all rows of a single PDF, pages in order.
pub fn extract_file(
    input: &PdfInput,
    extractor: &dyn PdfExtractor,
    layout: &Layout,
) -> Result<Vec<ExtractedRow>, PedidosError> {
    let pages = extractor.extract_pages(&input.bytes)?;
    let rows = extract_document(&pages, layout);
    debug!(
        file = %input.name,
        backend = extractor.backend_name(),
        pages = pages.len(),
        rows = rows.len(),
        "extracted file"
    );
    Ok(rows)
}

/// Run every input through the extractor, one file at a time, and
/// concatenate the rows.
///
/// A file that fails to open is recorded in `errors` and contributes no
/// rows; the remaining files are still processed.
pub fn aggregate(
    inputs: &[PdfInput],
    extractor: &dyn PdfExtractor,
    layout: &Layout,
) -> BatchResult {
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        match extract_file(input, extractor, layout) {
            Ok(file_rows) => rows.extend(file_rows),
            Err(e) => {
                warn!(file = %input.name, error = %e, "skipping file");
                errors.push(FileError {
                    file: input.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    let rows = assign_indices(rows);
    info!(
        files = inputs.len(),
        failed = errors.len(),
        rows = rows.len(),
        "batch complete"
    );

    BatchResult { rows, errors }
}

/// Number rows 1..=N by their final position.
pub fn assign_indices(rows: Vec<ExtractedRow>) -> Vec<IndexedRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| IndexedRow { index: i + 1, row })
        .collect()
}
