pub mod batch;
pub mod error;
pub mod export;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod page;

use batch::aggregate;
use error::PedidosError;
use extraction::PdfExtractor;
use layout::Layout;
use model::{FileError, IndexedRow, PdfInput};

/// What a batch produced.
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// At least one row was found; `workbook` is the exported .xlsx.
    Extracted {
        rows: Vec<IndexedRow>,
        workbook: Vec<u8>,
    },
    /// No product was found in any file. Not an error.
    Empty,
}

/// Result of [`process_batch`]: the outcome plus any per-file failures.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcome: BatchOutcome,
    pub errors: Vec<FileError>,
}

impl BatchReport {
    /// Number of rows extracted (and written to the workbook).
    pub fn row_count(&self) -> usize {
        match &self.outcome {
            BatchOutcome::Extracted { rows, .. } => rows.len(),
            BatchOutcome::Empty => 0,
        }
    }
}

/// Main API entry point: extract rows from a batch of PDFs and export them.
///
/// Files that fail to open are reported in `errors` and do not stop the
/// batch. The workbook is only built when at least one row was found. The
/// only error returned is a failure to write the workbook itself.
pub fn process_batch(
    inputs: &[PdfInput],
    extractor: &dyn PdfExtractor,
    layout: &Layout,
) -> Result<BatchReport, PedidosError> {
    let result = aggregate(inputs, extractor, layout);

    let outcome = if result.is_empty() {
        BatchOutcome::Empty
    } else {
        let workbook = export::write_xlsx(&result.rows)?;
        BatchOutcome::Extracted {
            rows: result.rows,
            workbook,
        }
    };

    Ok(BatchReport {
        outcome,
        errors: result.errors,
    })
}
