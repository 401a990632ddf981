//! Excel importer implementation - Excel (.xlsx) → CSV

use crate::error::{ConvertError, ConvertResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counts reported after a successful import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub sheets: usize,
    pub rows: usize,
}

/// Excel importer for flattening every worksheet of a .xlsx file into one CSV file
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write every row of every sheet, in workbook order, to `output` as CSV.
    ///
    /// The destination is truncated before the first row is written, so a failure
    /// part way through leaves the rows written so far behind.
    pub fn import_to_csv(&self, output: &Path) -> ConvertResult<ImportSummary> {
        let mut workbook: Xlsx<_> =
            open_workbook(&self.path).map_err(|source| ConvertError::OpenWorkbook {
                path: self.path.clone(),
                source,
            })?;

        let file = File::create(output).map_err(|source| ConvertError::Create {
            path: output.to_path_buf(),
            source,
        })?;

        // Dropping the writer on an early return flushes whatever is buffered.
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

        let mut summary = ImportSummary::default();
        let sheet_names = workbook.sheet_names().to_vec();

        for sheet_name in sheet_names {
            // Declared extent, which also covers formatted blank cells.
            let declared = workbook
                .worksheet_cells_reader(&sheet_name)
                .map(|cells| {
                    let dimensions = cells.dimensions();
                    (dimensions.start, dimensions.end)
                })
                .map_err(|source| ConvertError::Read {
                    sheet: sheet_name.clone(),
                    source,
                })?;

            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|source| ConvertError::Read {
                    sheet: sheet_name.clone(),
                    source,
                })?;

            let rows = write_sheet(&range, declared, &mut writer).map_err(|source| {
                ConvertError::Write {
                    path: output.to_path_buf(),
                    source,
                }
            })?;
            debug!(sheet = %sheet_name, rows, "sheet written");

            summary.sheets += 1;
            summary.rows += rows;
        }

        writer
            .flush()
            .map_err(|source| ConvertError::Write {
                path: output.to_path_buf(),
                source: source.into(),
            })?;

        info!(
            input = %self.path.display(),
            sheets = summary.sheets,
            rows = summary.rows,
            "workbook converted to CSV"
        );
        Ok(summary)
    }
}

/// Write one sheet's rows, returning how many records were written.
///
/// Records always start at A1 so cell (i, j) lands at record i, field j. The
/// grid spans the value range and the sheet's declared dimension, whichever is
/// larger; calamine's value range alone would drop blank rows and columns.
fn write_sheet<W: std::io::Write>(
    range: &Range<Data>,
    declared: ((u32, u32), (u32, u32)),
    writer: &mut csv::Writer<W>,
) -> Result<usize, csv::Error> {
    let Some((rows, cols)) = sheet_extent(range, declared) else {
        return Ok(0);
    };

    for row in 0..rows {
        let record: Vec<String> = (0..cols)
            .map(|col| range.get_value((row, col)).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    Ok(rows as usize)
}

/// Row and column count of the grid to write, measured from A1.
///
/// A sheet with no values and a single-cell dimension is empty: that is what
/// writers declare for a worksheet without cells.
fn sheet_extent(
    range: &Range<Data>,
    (declared_start, declared_end): ((u32, u32), (u32, u32)),
) -> Option<(u32, u32)> {
    let value_end = range.end();
    if value_end.is_none() && declared_start == declared_end {
        return None;
    }

    let (value_row, value_col) = value_end.unwrap_or((0, 0));
    Some((
        value_row.max(declared_end.0) + 1,
        value_col.max(declared_end.1) + 1,
    ))
}

/// Text rendering of a single cell; formatting is left to the cell type
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
