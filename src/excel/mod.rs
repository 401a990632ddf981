//! Excel ↔ CSV conversion
//!
//! - Import: Excel (.xlsx) → CSV, every sheet flattened in workbook order
//! - Export: CSV → Excel (.xlsx), one sheet, one string cell per field

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, ExportSummary, DEFAULT_SHEET_NAME};
pub use importer::{cell_text, ExcelImporter, ImportSummary};
