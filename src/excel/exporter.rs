//! Excel exporter implementation - CSV → Excel (.xlsx)

use crate::error::{ConvertError, ConvertResult};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the single worksheet when none is configured
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Counts reported after a successful export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rows stored in the worksheet
    pub rows: usize,
    /// Cells stored in the worksheet, blank cells for empty fields included
    pub cells: usize,
}

/// Excel exporter for loading a CSV file into a single-sheet .xlsx workbook
pub struct ExcelExporter {
    path: PathBuf,
    sheet_name: String,
}

impl ExcelExporter {
    /// Create a new Excel exporter reading from the CSV file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    /// Name the worksheet that receives the records
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Build the workbook in memory and save it to `output` in one final write.
    ///
    /// Nothing is written to `output` unless every record parsed.
    pub fn export_to_xlsx(&self, output: &Path) -> ConvertResult<ExportSummary> {
        let raw = std::fs::read(&self.path).map_err(|source| ConvertError::OpenCsv {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            // Ragged rows are kept as they are.
            .flexible(true)
            .from_reader(raw.as_slice());

        let mut workbook = Workbook::new();
        pin_creation_time(&mut workbook).map_err(|source| ConvertError::Save {
            path: output.to_path_buf(),
            source,
        })?;

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(|source| ConvertError::Sheet {
                name: self.sheet_name.clone(),
                source,
            })?;

        // Excel drops empty strings, so empty fields become text-formatted blanks.
        let blank = Format::new().set_num_format("@");
        let mut summary = ExportSummary::default();
        let mut last_record: Option<(u64, usize)> = None;

        // `records()` yields None at end of input; every Some(Err) is a real failure.
        for (index, result) in reader.records().enumerate() {
            let record_number = index as u64 + 1;
            let record = result.map_err(|source| ConvertError::Parse {
                record: record_number,
                source,
            })?;
            if let Some(position) = record.position() {
                last_record = Some((record_number, position.byte() as usize));
            }

            let fields: Vec<&str> = record.iter().collect();
            let stored = write_row(worksheet, index, &fields, &blank).map_err(|source| {
                ConvertError::Save {
                    path: output.to_path_buf(),
                    source,
                }
            })?;

            summary.rows += 1;
            summary.cells += stored;
        }

        // The reader closes an open quote silently at end of input.
        if let Some((record, start)) = last_record {
            if ends_inside_quotes(raw.get(start..).unwrap_or_default()) {
                return Err(ConvertError::Parse {
                    record,
                    source: io::Error::new(
                        io::ErrorKind::InvalidData,
                        "extraneous or missing \" in quoted field",
                    )
                    .into(),
                });
            }
        }
        debug!(rows = summary.rows, cells = summary.cells, "records loaded");

        workbook.save(output).map_err(|source| ConvertError::Save {
            path: output.to_path_buf(),
            source,
        })?;

        info!(
            input = %self.path.display(),
            sheet = %self.sheet_name,
            rows = summary.rows,
            "CSV converted to workbook"
        );
        Ok(summary)
    }
}

/// Store one record as a row of string cells, returning how many cells were stored
fn write_row(
    worksheet: &mut Worksheet,
    index: usize,
    fields: &[&str],
    blank: &Format,
) -> Result<usize, XlsxError> {
    let row = u32::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)?;

    for (col_idx, field) in fields.iter().enumerate() {
        let col = u16::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;
        if field.is_empty() {
            worksheet.write_blank(row, col, blank)?;
        } else {
            worksheet.write_string(row, col, *field)?;
        }
    }
    Ok(fields.len())
}

/// True when `raw` ends inside a quoted field that was never closed.
///
/// Quotes only open a field at its first byte; `""` inside a quoted field is an
/// escaped quote, and a quote inside an unquoted field is literal.
fn ends_inside_quotes(raw: &[u8]) -> bool {
    let mut in_quotes = false;
    let mut field_start = true;
    let mut bytes = raw.iter().peekable();

    while let Some(&b) = bytes.next() {
        if in_quotes {
            if b == b'"' {
                if bytes.peek() == Some(&&b'"') {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        match b {
            b'"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            b',' | b'\n' | b'\r' => field_start = true,
            _ => field_start = false,
        }
    }
    in_quotes
}

/// Fix the document creation time so identical input saves to identical bytes
fn pin_creation_time(workbook: &mut Workbook) -> Result<(), XlsxError> {
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::TempDir;

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let names = workbook.sheet_names().to_vec();
        let range = workbook.worksheet_range(&names[0]).unwrap();
        let rows = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect();
        (names, rows)
    }

    #[test]
    fn test_ends_inside_quotes() {
        assert!(!ends_inside_quotes(b"a,b\n"));
        assert!(!ends_inside_quotes(b"\"a,b\",c\n"));
        assert!(!ends_inside_quotes(b"\"say \"\"hi\"\"\"\n"));
        assert!(!ends_inside_quotes(b"ab\"c,d\n"));
        assert!(!ends_inside_quotes(b""));
        assert!(ends_inside_quotes(b"a,\"unterminated\nb,c\n"));
        assert!(ends_inside_quotes(b"\"open \"\"\n"));
    }

    #[test]
    fn test_export_quoted_fields() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("quoted.csv");
        let output = dir.path().join("quoted.xlsx");
        std::fs::write(&input, "\"a,b\",\"say \"\"hi\"\"\"\r\n\"multi\nline\",x\r\n").unwrap();

        let summary = ExcelExporter::new(&input).export_to_xlsx(&output).unwrap();
        assert_eq!(summary, ExportSummary { rows: 2, cells: 4 });

        let (names, rows) = read_back(&output);
        assert_eq!(names, vec!["Sheet1"]);
        assert_eq!(rows[0], vec!["a,b", "say \"hi\""]);
        assert_eq!(rows[1], vec!["multi\nline", "x"]);
    }

    #[test]
    fn test_export_counts_empty_fields_as_cells() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("blanks.csv");
        let output = dir.path().join("blanks.xlsx");
        std::fs::write(&input, "a,\n,b\n,\n").unwrap();

        let summary = ExcelExporter::new(&input).export_to_xlsx(&output).unwrap();
        assert_eq!(summary, ExportSummary { rows: 3, cells: 6 });
    }

    #[test]
    fn test_export_unterminated_quote_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("open.csv");
        let output = dir.path().join("open.xlsx");
        std::fs::write(&input, "a,\"unterminated\nb,c\n").unwrap();

        match ExcelExporter::new(&input).export_to_xlsx(&output) {
            Err(ConvertError::Parse { record, source }) => {
                assert_eq!(record, 1);
                assert!(source.to_string().contains("quoted field"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
        assert!(!output.exists(), "no partial workbook on parse failure");
    }

    #[test]
    fn test_export_custom_sheet_name() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("data.xlsx");
        std::fs::write(&input, "1,2\n").unwrap();

        ExcelExporter::new(&input)
            .with_sheet_name("Data")
            .export_to_xlsx(&output)
            .unwrap();

        let (names, rows) = read_back(&output);
        assert_eq!(names, vec!["Data"]);
        // Numbers stay text
        assert_eq!(rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_export_invalid_sheet_name() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("data.xlsx");
        std::fs::write(&input, "a\n").unwrap();

        let result = ExcelExporter::new(&input)
            .with_sheet_name("bad[name]")
            .export_to_xlsx(&output);
        assert!(matches!(result, Err(ConvertError::Sheet { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_export_invalid_utf8_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.csv");
        let output = dir.path().join("bad.xlsx");
        std::fs::write(&input, b"ok,row\n\xff\xfe,oops\n").unwrap();

        match ExcelExporter::new(&input).export_to_xlsx(&output) {
            Err(ConvertError::Parse { record, .. }) => assert_eq!(record, 2),
            other => panic!("Expected Parse error, got {:?}", other),
        }
        assert!(!output.exists(), "no partial workbook on parse failure");
    }

    #[test]
    fn test_export_missing_input() {
        let dir = TempDir::new().unwrap();
        let result = ExcelExporter::new(dir.path().join("missing.csv"))
            .export_to_xlsx(&dir.path().join("out.xlsx"));
        assert!(matches!(result, Err(ConvertError::OpenCsv { .. })));
    }
}
