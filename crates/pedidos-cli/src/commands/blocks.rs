use pedidos_core::error::PedidosError;
use pedidos_core::extraction::pdftotext::PdftotextExtractor;
use pedidos_core::extraction::PdfExtractor;
use pedidos_core::page::{classify_block, find_page_label, BlockRole};
use std::path::Path;

pub fn run(
    pdf_file: &Path,
    page_filter: Option<usize>,
    preset: Option<&str>,
    layout_file: Option<&Path>,
) -> Result<(), PedidosError> {
    let layout = super::resolve_layout(preset, layout_file)?;
    let pdf_bytes = std::fs::read(pdf_file)?;
    let pages = PdftotextExtractor::new().extract_pages(&pdf_bytes)?;

    if let Some(n) = page_filter {
        if n == 0 || n > pages.len() {
            return Err(PedidosError::Extraction(format!(
                "page {} out of range (document has {} pages)",
                n,
                pages.len()
            )));
        }
    }

    let config = layout.config();
    for page in &pages {
        if page_filter.is_some_and(|n| n != page.page_number) {
            continue;
        }

        println!(
            "--- Page {} (label: {}) ---",
            page.page_number,
            find_page_label(&page.blocks, &config.page_marker)
        );
        println!(
            "  {:>3}  {:>7}  {:>7}  {:<12}  Text",
            "#", "x", "y", "Role"
        );

        for block in &page.blocks {
            let role = match classify_block(block, &layout) {
                BlockRole::Product(code) => format!("product {}", code),
                BlockRole::Quantity(value) => format!("qty {}", value),
                BlockRole::Other if block.text.contains(&config.page_marker) => "page".into(),
                BlockRole::Other => "-".into(),
            };
            println!(
                "  {:>3}  {:>7.1}  {:>7.1}  {:<12}  {}",
                block.block_number,
                block.left(),
                block.top(),
                role,
                block.text.replace('\n', " | ")
            );
        }
        println!();
    }

    Ok(())
}
