use crate::error::{ConvertError, ConvertResult};
use crate::excel::{ExcelExporter, ExcelImporter, DEFAULT_SHEET_NAME};
use crate::format::TargetFormat;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings shared by both conversion directions
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Worksheet name used when producing XLSX
    pub sheet_name: String,
    /// Print progress and row counts to stderr
    pub verbose: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            verbose: false,
        }
    }
}

/// Execute a conversion to `format`.
///
/// Only the first of `inputs` is converted; the rest are ignored. Stdout gets the
/// confirmation line only; verbose progress goes to stderr.
pub fn convert(
    format: &str,
    inputs: Vec<PathBuf>,
    output: PathBuf,
    options: &ConvertOptions,
) -> ConvertResult<()> {
    let target: TargetFormat = format.parse()?;

    let mut inputs = inputs.into_iter();
    let input = inputs
        .next()
        .ok_or_else(|| ConvertError::Usage("missing input file".to_string()))?;
    let ignored: Vec<PathBuf> = inputs.collect();
    if !ignored.is_empty() {
        warn!(count = ignored.len(), "extra input files ignored");
    }

    debug!(%target, input = %input.display(), output = %output.display(), "converting");

    match target {
        TargetFormat::Csv => xlsx_to_csv(&input, &output, options)?,
        TargetFormat::Xlsx => csv_to_xlsx(&input, &output, options)?,
    }

    println!(
        "{}",
        format!("Conversion to {} completed successfully.", target.label()).green()
    );
    Ok(())
}

fn xlsx_to_csv(input: &Path, output: &Path, options: &ConvertOptions) -> ConvertResult<()> {
    if options.verbose {
        eprintln!("{}", "📖 Reading Excel file...".cyan());
        eprintln!("   Input:  {}", input.display());
        eprintln!("   Output: {}", output.display());
    }

    let summary = ExcelImporter::new(input).import_to_csv(output)?;

    if options.verbose {
        eprintln!(
            "   {} sheets, {} rows written",
            summary.sheets.to_string().bright_blue(),
            summary.rows.to_string().bright_blue()
        );
    }
    Ok(())
}

fn csv_to_xlsx(input: &Path, output: &Path, options: &ConvertOptions) -> ConvertResult<()> {
    if options.verbose {
        eprintln!("{}", "📖 Reading CSV file...".cyan());
        eprintln!("   Input:  {}", input.display());
        eprintln!("   Output: {}", output.display());
        eprintln!("   Sheet:  {}", options.sheet_name.bright_yellow());
    }

    let summary = ExcelExporter::new(input)
        .with_sheet_name(options.sheet_name.clone())
        .export_to_xlsx(output)?;

    if options.verbose {
        eprintln!(
            "   {} rows, {} cells written",
            summary.rows.to_string().bright_blue(),
            summary.cells.to_string().bright_blue()
        );
    }
    Ok(())
}
