//! Sheetconv - Excel ↔ CSV conversion
//!
//! This library converts spreadsheets between Excel (.xlsx) workbooks and CSV text.
//!
//! # Features
//!
//! - Excel → CSV: every sheet, every row, cells rendered as text
//! - CSV → Excel: one sheet, one string cell per field, ragged rows kept
//! - Standard CSV quoting (embedded commas, quotes and newlines)
//! - Reproducible output: the same input always saves to the same bytes
//!
//! # Example
//!
//! ```no_run
//! use royalbit_sheetconv::excel::{ExcelExporter, ExcelImporter};
//! use std::path::Path;
//!
//! let summary = ExcelExporter::new("people.csv").export_to_xlsx(Path::new("people.xlsx"))?;
//! println!("Rows: {}", summary.rows);
//!
//! let summary = ExcelImporter::new("people.xlsx").import_to_csv(Path::new("people.csv"))?;
//! println!("Sheets: {}", summary.sheets);
//! # Ok::<(), royalbit_sheetconv::error::ConvertError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod format;

// Re-export commonly used types
pub use error::{ConvertError, ConvertResult};
pub use format::TargetFormat;
