use clap::Parser;
use colored::Colorize;
use royalbit_sheetconv::cli::{self, ConvertOptions};
use royalbit_sheetconv::excel::DEFAULT_SHEET_NAME;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "sheetconv")]
#[command(about = "Convert spreadsheets between Excel (.xlsx) and CSV.")]
#[command(long_about = "Sheetconv - Excel ↔ CSV conversion

FORMATS:
  csv   - Excel (.xlsx) → CSV. Every sheet is written, in workbook order,
          into one CSV file. Cells are written as text.
  xlsx  - CSV → Excel (.xlsx). One sheet, one row per record,
          one text cell per field. Ragged rows are kept as they are.

EXAMPLES:
  sheetconv -f csv -o report.csv report.xlsx
  sheetconv -f xlsx -o people.xlsx people.csv
  sheetconv -f xlsx -o people.xlsx --sheet-name People people.csv

Set RUST_LOG=sheetconv=debug for detailed logs.")]
#[command(version)]
struct Cli {
    /// The format to convert to: 'csv' or 'xlsx'
    #[arg(short = 'f', long = "format")]
    format: String,

    /// The output filename
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// The input filename (extra files are ignored)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Worksheet name used when converting to xlsx
    #[arg(long, default_value = DEFAULT_SHEET_NAME, env = "SHEETCONV_SHEET_NAME")]
    sheet_name: String,

    /// Show verbose conversion steps
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sheetconv=debug,royalbit_sheetconv=debug"
    } else {
        "sheetconv=warn,royalbit_sheetconv=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ConvertOptions {
        sheet_name: cli.sheet_name,
        verbose: cli.verbose,
    };

    match cli::convert(&cli.format, cli.inputs, cli.output, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(stage = e.stage(), error = %e, "conversion failed");
            eprintln!("{} {}", "Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
