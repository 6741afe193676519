use pedidos_core::export::HEADERS;
use pedidos_core::model::IndexedRow;

pub fn print(rows: &[IndexedRow]) {
    print!("{}", format_rows(rows));
}

/// Render rows as an aligned text table under the spreadsheet headers.
pub fn format_rows(rows: &[IndexedRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.index.to_string(),
                r.row.product.clone(),
                r.row.quantity.to_string(),
                r.row.page_label.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>w0$}  {:<w1$}  {:>w2$}  {}\n",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    ));
    out.push_str(&format!(
        "{}\n",
        "-".repeat(widths.iter().sum::<usize>() + 6)
    ));

    for [index, product, quantity, page] in &cells {
        out.push_str(&format!(
            "{:>w0$}  {:<w1$}  {:>w2$}  {}\n",
            index,
            product,
            quantity,
            page,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedidos_core::model::ExtractedRow;

    fn indexed(index: usize, product: &str, quantity: u64, page_label: &str) -> IndexedRow {
        IndexedRow {
            index,
            row: ExtractedRow {
                product: product.to_string(),
                quantity,
                page_label: page_label.to_string(),
            },
        }
    }

    #[test]
    fn test_format_rows_aligns_columns() {
        let table = format_rows(&[
            indexed(1, "JBGF1001", 12, "001"),
            indexed(2, "JBGF2", 0, "N/A"),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ÍNDICE  PRODUTO   QTD.  PÁGINA");
        assert_eq!(lines[2], "     1  JBGF1001    12  001");
        assert_eq!(lines[3], "     2  JBGF2        0  N/A");
    }

    #[test]
    fn test_format_rows_header_only() {
        let table = format_rows(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
