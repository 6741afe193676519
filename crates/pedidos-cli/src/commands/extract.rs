use pedidos_core::error::PedidosError;
use pedidos_core::extraction::pdftotext::PdftotextExtractor;
use pedidos_core::layout::schema::MatchMode;
use pedidos_core::model::{FileError, PdfInput};
use pedidos_core::BatchOutcome;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::output;

pub fn run(
    input_files: Vec<PathBuf>,
    preset: Option<&str>,
    layout_file: Option<&Path>,
    exclusive: bool,
    output_format: &str,
    xlsx_path: &Path,
) -> Result<(), PedidosError> {
    let mut layout = super::resolve_layout(preset, layout_file)?;
    if exclusive {
        layout = layout.with_matching(MatchMode::Exclusive);
    }
    info!(
        layout = %layout.config().name,
        matching = %layout.matching(),
        files = input_files.len(),
        "starting extraction"
    );

    // A file we cannot read is reported like one we cannot parse.
    let mut inputs = Vec::with_capacity(input_files.len());
    let mut read_errors = Vec::new();
    for path in &input_files {
        let name = path.display().to_string();
        match std::fs::read(path) {
            Ok(bytes) => inputs.push(PdfInput::new(name, bytes)),
            Err(e) => read_errors.push(FileError {
                file: name,
                message: e.to_string(),
            }),
        }
    }

    if !PdftotextExtractor::is_available() {
        warn!("pdftotext was not found on PATH; every file will fail to open");
    }
    let extractor = PdftotextExtractor::new();
    let report = pedidos_core::process_batch(&inputs, &extractor, &layout)?;

    for e in read_errors.iter().chain(&report.errors) {
        eprintln!("error: {e}");
    }

    match report.outcome {
        BatchOutcome::Empty => {
            if output_format == "json" {
                println!("[]");
            }
            eprintln!(
                "No product data could be extracted from the given files. \
                 Check that the PDFs follow the '{}' layout (see `pedidos layout show`) \
                 or inspect them with `pedidos blocks <FILE>`.",
                layout.config().name
            );
        }
        BatchOutcome::Extracted { rows, workbook } => {
            match output_format {
                "json" => output::json::print(&rows)?,
                _ => output::table::print(&rows),
            }

            std::fs::write(xlsx_path, &workbook)?;
            eprintln!(
                "Extracted {} row(s) from {} file(s), written to {}",
                rows.len(),
                inputs.len() - report.errors.len(),
                xlsx_path.display()
            );
        }
    }

    Ok(())
}
