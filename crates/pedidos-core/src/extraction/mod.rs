pub mod pdftotext;

use crate::error::PedidosError;

#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// A contiguous run of text reported by the PDF backend, with its position.
///
/// Only the left edge (`bbox.x_min`), the top edge (`bbox.y_min`) and the
/// text take part in row extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub bbox: BBox,
    pub text: String,
    /// Position of the block in the backend's reading order on its page.
    pub block_number: usize,
}

impl TextBlock {
    pub fn left(&self) -> f64 {
        self.bbox.x_min
    }

    pub fn top(&self) -> f64 {
        self.bbox.y_min
    }
}

/// Positioned text blocks of a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page index within the file (not the printed page label).
    pub page_number: usize,
    pub blocks: Vec<TextBlock>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Open PDF bytes and return the positioned blocks of every page, in page order.
    ///
    /// Any resource opened for the document is released before returning,
    /// on success and on failure alike.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PedidosError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
