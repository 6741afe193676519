pub mod xlsx;

pub use xlsx::write_xlsx;

/// Column headers of the exported sheet, in order.
pub const HEADERS: [&str; 4] = ["ÍNDICE", "PRODUTO", "QTD.", "PÁGINA"];

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Pedidos";

/// File name offered for the exported workbook.
pub const DEFAULT_FILE_NAME: &str = "produtos_extraidos.xlsx";
