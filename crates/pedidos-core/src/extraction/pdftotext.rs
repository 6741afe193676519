use crate::error::PedidosError;
use crate::extraction::{BBox, PageContent, PdfExtractor, TextBlock};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;
use tracing::{debug, trace};

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout`, which groups words into lines and lines
/// into blocks, each with a bounding box in PDF points (origin top-left).
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PedidosError> {
        // The temp file is removed when `tmpfile` drops, whichever way we leave.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| PedidosError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| PedidosError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(&tmp_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PedidosError::PdftotextNotFound
                } else {
                    PedidosError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PedidosError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml)?;
        debug!(pages = pages.len(), "pdftotext extracted document");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse `pdftotext -bbox-layout` XHTML into pages of text blocks.
///
/// Words of a line are joined with a space, lines of a block with `\n`.
/// Pages are numbered in document order starting at 1.
pub(crate) fn parse_bbox_xml(xml: &str) -> Result<Vec<PageContent>, PedidosError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageContent> = Vec::new();
    let mut block_bbox: Option<BBox> = None;
    let mut block_lines: Vec<String> = Vec::new();
    let mut line_words: Vec<String> = Vec::new();
    let mut word: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            PedidosError::Extraction(format!(
                "invalid pdftotext output at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => pages.push(new_page(pages.len())),
                b"block" => {
                    block_bbox = parse_bbox(&tag);
                    block_lines.clear();
                }
                b"line" => line_words.clear(),
                b"word" => word = Some(String::new()),
                _ => {}
            },
            Event::Empty(tag) if tag.name().as_ref() == b"page" => {
                pages.push(new_page(pages.len()));
            }
            Event::Text(text) => {
                if let Some(w) = word.as_mut() {
                    let decoded = text
                        .unescape()
                        .map_err(|e| PedidosError::Extraction(e.to_string()))?;
                    w.push_str(&decoded);
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"word" => {
                    if let Some(w) = word.take() {
                        let w = w.trim();
                        if !w.is_empty() {
                            line_words.push(w.to_string());
                        }
                    }
                }
                b"line" => {
                    if !line_words.is_empty() {
                        block_lines.push(line_words.join(" "));
                    }
                    line_words.clear();
                }
                b"block" => {
                    let bbox = block_bbox.take();
                    if let (Some(bbox), Some(page)) = (bbox, pages.last_mut()) {
                        if !block_lines.is_empty() {
                            let block = TextBlock {
                                bbox,
                                text: block_lines.join("\n"),
                                block_number: page.blocks.len(),
                            };
                            trace!(
                                page = page.page_number,
                                x = block.left(),
                                y = block.top(),
                                text = %block.text,
                                "block"
                            );
                            page.blocks.push(block);
                        }
                    }
                    block_lines.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn new_page(index: usize) -> PageContent {
    PageContent {
        page_number: index + 1,
        blocks: Vec::new(),
    }
}

fn parse_bbox(tag: &BytesStart<'_>) -> Option<BBox> {
    Some(BBox {
        x_min: parse_attr_f64(tag, "xMin")?,
        y_min: parse_attr_f64(tag, "yMin")?,
        x_max: parse_attr_f64(tag, "xMax")?,
        y_max: parse_attr_f64(tag, "yMax")?,
    })
}

fn parse_attr_f64(tag: &BytesStart<'_>, name: &str) -> Option<f64> {
    let attr = tag.try_get_attribute(name).ok()??;
    std::str::from_utf8(&attr.value).ok()?.trim().parse().ok()
}
