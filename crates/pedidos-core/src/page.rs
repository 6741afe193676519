//! Row extraction from the positioned text blocks of one page.
//!
//! A page is read in three steps: find the printed page label, sort blocks
//! into product and quantity candidates by their left edge, then give every
//! product the quantity sitting on the same row (or 0).

use crate::extraction::{PageContent, TextBlock};
use crate::layout::schema::MatchMode;
use crate::layout::Layout;
use crate::model::{
    ExtractedRow, PageRows, ProductCandidate, QuantityCandidate, MISSING_PAGE_LABEL,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// Extract the page label and one row per product candidate from a page.
pub fn extract_page(page: &PageContent, layout: &Layout) -> PageRows {
    let page_label = find_page_label(&page.blocks, &layout.config().page_marker);
    let (products, quantities) = classify_blocks(&page.blocks, layout);
    let rows = match_rows(
        &products,
        &quantities,
        layout.config().row_tolerance,
        layout.matching(),
        &page_label,
    );

    debug!(
        page = page.page_number,
        label = %page_label,
        blocks = page.blocks.len(),
        products = products.len(),
        quantities = quantities.len(),
        "extracted page"
    );

    PageRows { page_label, rows }
}

/// Extract every page of a document, flattening rows in page order.
pub fn extract_document(pages: &[PageContent], layout: &Layout) -> Vec<ExtractedRow> {
    pages
        .iter()
        .flat_map(|page| extract_page(page, layout).rows)
        .collect()
}

/// Printed page number of a page.
///
/// Scans blocks in order for one containing `marker` and returns the first
/// run of digits in its text. A marker block without digits does not end the
/// scan. Returns "N/A" when no block yields a label.
pub fn find_page_label(blocks: &[TextBlock], marker: &str) -> String {
    blocks
        .iter()
        .filter(|b| b.text.contains(marker))
        .find_map(|b| DIGIT_RUN.find(&b.text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| MISSING_PAGE_LABEL.to_string())
}

/// What a single block is taken for.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockRole {
    Product(String),
    Quantity(u64),
    Other,
}

/// Classify one block by its left edge and trimmed text.
///
/// The layout's bands are validated to be disjoint, so a block can only
/// ever qualify for one role.
pub fn classify_block(block: &TextBlock, layout: &Layout) -> BlockRole {
    let config = layout.config();
    let x = block.left();
    let text = block.text.trim();

    if config.product_band.contains(x) {
        if let Some(code) = layout.find_product(text) {
            return BlockRole::Product(code.to_string());
        }
    }

    if config.quantity_band.contains(x) {
        if let Some(value) = parse_quantity(text) {
            return BlockRole::Quantity(value);
        }
    }

    BlockRole::Other
}

/// Split blocks into product and quantity candidates, keeping block order.
pub fn classify_blocks(
    blocks: &[TextBlock],
    layout: &Layout,
) -> (Vec<ProductCandidate>, Vec<QuantityCandidate>) {
    let mut products = Vec::new();
    let mut quantities = Vec::new();

    for block in blocks {
        match classify_block(block, layout) {
            BlockRole::Product(code) => products.push(ProductCandidate {
                code,
                y: block.top(),
            }),
            BlockRole::Quantity(value) => quantities.push(QuantityCandidate {
                value,
                y: block.top(),
            }),
            BlockRole::Other => {}
        }
    }

    (products, quantities)
}

/// A quantity is a non-empty run made only of ASCII digits.
fn parse_quantity(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Build one row per product, in product order.
///
/// A product takes the first quantity (in discovery order) whose top is
/// strictly closer than `tolerance`; ties are not broken by distance. In
/// [`MatchMode::Exclusive`] a quantity already taken is skipped.
pub fn match_rows(
    products: &[ProductCandidate],
    quantities: &[QuantityCandidate],
    tolerance: f64,
    mode: MatchMode,
    page_label: &str,
) -> Vec<ExtractedRow> {
    let mut taken = vec![false; quantities.len()];

    products
        .iter()
        .map(|product| {
            let hit = quantities.iter().enumerate().find(|(i, q)| {
                (product.y - q.y).abs() < tolerance
                    && !(mode == MatchMode::Exclusive && taken[*i])
            });

            let quantity = match hit {
                Some((i, q)) => {
                    taken[i] = true;
                    q.value
                }
                None => 0,
            };

            ExtractedRow {
                product: product.code.clone(),
                quantity,
                page_label: page_label.to_string(),
            }
        })
        .collect()
}
