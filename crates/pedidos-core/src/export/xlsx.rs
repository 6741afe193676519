//! Minimal SpreadsheetML writer.
//!
//! An .xlsx file is a ZIP archive of XML parts. We write the five parts a
//! reader needs for a single sheet and use inline strings, so no shared
//! string table or style sheet is required.

use super::{HEADERS, SHEET_NAME};
use crate::error::PedidosError;
use crate::model::IndexedRow;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

enum Cell<'a> {
    Number(u64),
    Text(&'a str),
}

/// Write rows as a single-sheet workbook: a header row, then one row per
/// extracted row (index, product, quantity, page label).
pub fn write_xlsx(rows: &[IndexedRow]) -> Result<Vec<u8>, PedidosError> {
    let parts = [
        ("[Content_Types].xml", content_types_xml()?),
        ("_rels/.rels", root_rels_xml()?),
        ("xl/workbook.xml", workbook_xml()?),
        ("xl/_rels/workbook.xml.rels", workbook_rels_xml()?),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts {
        zip.start_file(name, options).map_err(export_err)?;
        zip.write_all(&content)?;
    }

    let bytes = zip.finish().map_err(export_err)?.into_inner();
    debug!(rows = rows.len(), bytes = bytes.len(), "wrote xlsx workbook");
    Ok(bytes)
}

fn content_types_xml() -> Result<Vec<u8>, PedidosError> {
    let mut w = xml_writer()?;
    start(&mut w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    empty(&mut w, "Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    empty(
        &mut w,
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    empty(
        &mut w,
        "Override",
        &[("PartName", "/xl/workbook.xml"), ("ContentType", CT_WORKBOOK)],
    )?;
    empty(
        &mut w,
        "Override",
        &[
            ("PartName", "/xl/worksheets/sheet1.xml"),
            ("ContentType", CT_WORKSHEET),
        ],
    )?;
    end(&mut w, "Types")?;
    Ok(w.into_inner().into_inner())
}

fn root_rels_xml() -> Result<Vec<u8>, PedidosError> {
    let mut w = xml_writer()?;
    start(&mut w, "Relationships", &[("xmlns", NS_PKG_REL)])?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_OFFICE_DOCUMENT),
            ("Target", "xl/workbook.xml"),
        ],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner().into_inner())
}

fn workbook_xml() -> Result<Vec<u8>, PedidosError> {
    let mut w = xml_writer()?;
    start(&mut w, "workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
    start(&mut w, "sheets", &[])?;
    empty(
        &mut w,
        "sheet",
        &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")],
    )?;
    end(&mut w, "sheets")?;
    end(&mut w, "workbook")?;
    Ok(w.into_inner().into_inner())
}

fn workbook_rels_xml() -> Result<Vec<u8>, PedidosError> {
    let mut w = xml_writer()?;
    start(&mut w, "Relationships", &[("xmlns", NS_PKG_REL)])?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_WORKSHEET),
            ("Target", "worksheets/sheet1.xml"),
        ],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner().into_inner())
}

fn sheet_xml(rows: &[IndexedRow]) -> Result<Vec<u8>, PedidosError> {
    let mut w = xml_writer()?;
    start(&mut w, "worksheet", &[("xmlns", NS_MAIN)])?;
    start(&mut w, "sheetData", &[])?;

    let header: Vec<Cell> = HEADERS.iter().map(|&h| Cell::Text(h)).collect();
    write_row(&mut w, 1, &header)?;

    for (i, r) in rows.iter().enumerate() {
        let cells = [
            Cell::Number(r.index as u64),
            Cell::Text(&r.row.product),
            Cell::Number(r.row.quantity),
            // Text, so labels like "007" keep their leading zeros.
            Cell::Text(&r.row.page_label),
        ];
        write_row(&mut w, i + 2, &cells)?;
    }

    end(&mut w, "sheetData")?;
    end(&mut w, "worksheet")?;
    Ok(w.into_inner().into_inner())
}

fn write_row(
    w: &mut Writer<Cursor<Vec<u8>>>,
    row_number: usize,
    cells: &[Cell<'_>],
) -> Result<(), PedidosError> {
    let r = row_number.to_string();
    start(w, "row", &[("r", r.as_str())])?;

    for (col, cell) in cells.iter().enumerate() {
        let reference = cell_ref(col, row_number);
        match cell {
            Cell::Number(n) => {
                start(w, "c", &[("r", reference.as_str())])?;
                text_element(w, "v", &n.to_string())?;
                end(w, "c")?;
            }
            Cell::Text(s) => {
                start(w, "c", &[("r", reference.as_str()), ("t", "inlineStr")])?;
                start(w, "is", &[])?;
                text_element(w, "t", s)?;
                end(w, "is")?;
                end(w, "c")?;
            }
        }
    }

    end(w, "row")
}

/// A1-style reference. The sheet never goes past column Z.
fn cell_ref(col: usize, row_number: usize) -> String {
    let letter = char::from(b'A' + col as u8);
    format!("{letter}{row_number}")
}

fn xml_writer() -> Result<Writer<Cursor<Vec<u8>>>, PedidosError> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(export_err)?;
    Ok(w)
}

fn start(
    w: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), PedidosError> {
    let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
    w.write_event(Event::Start(tag)).map_err(export_err)
}

fn empty(
    w: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), PedidosError> {
    let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
    w.write_event(Event::Empty(tag)).map_err(export_err)
}

fn end(w: &mut Writer<Cursor<Vec<u8>>>, name: &str) -> Result<(), PedidosError> {
    w.write_event(Event::End(BytesEnd::new(name)))
        .map_err(export_err)
}

fn text_element(
    w: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<(), PedidosError> {
    start(w, name, &[])?;
    w.write_event(Event::Text(BytesText::new(text)))
        .map_err(export_err)?;
    end(w, name)
}

fn export_err(e: impl std::fmt::Display) -> PedidosError {
    PedidosError::Export(e.to_string())
}
