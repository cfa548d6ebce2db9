//! Convert command - turn a time-clock PDF report into an XLSX workbook.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use ponto_core::error::{ExtractionError, PontoError};
use ponto_core::pdf::{PdfExtractor, PdfProcessor};
use ponto_core::timesheet::{HybridTimesheetParser, TimesheetParser};
use ponto_core::{ExtractionStrategy, XlsxWriter};

use super::load_config;

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input PDF (default: configured input path)
    input: Option<PathBuf>,

    /// Output XLSX file (default: configured output path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extraction strategy (default: configured strategy)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Write a header-only workbook when no records are found
    #[arg(long)]
    allow_empty: bool,

    /// Write dates and times as Excel values instead of text
    #[arg(long)]
    native_types: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    /// Tables first, then text patterns
    Auto,
    /// Tables only
    Table,
    /// Text patterns only
    Text,
}

impl From<StrategyArg> for ExtractionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => ExtractionStrategy::Auto,
            StrategyArg::Table => ExtractionStrategy::Table,
            StrategyArg::Text => ExtractionStrategy::Text,
        }
    }
}

pub fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(strategy) = args.strategy {
        config.extraction.strategy = strategy.into();
    }
    if args.native_types {
        config.output.native_types = true;
    }

    let input = args.input.clone().unwrap_or_else(|| config.paths.input.clone());
    let output = args.output.clone().unwrap_or_else(|| config.paths.output.clone());

    // Check input file exists
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Processing file: {}", input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading PDF...");
    let data = fs::read(&input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    pb.set_message("Extracting records...");
    let parser = HybridTimesheetParser::new(config.clone())?;

    // `None` when no tier found anything and an empty workbook was allowed
    let (extracted, warnings) = match parser.parse(&extractor) {
        Ok(result) => {
            debug!("Extraction took {}ms", result.processing_time_ms);
            (Some(result.timesheet), result.warnings)
        }
        Err(PontoError::Extraction(ExtractionError::NoRecords)) if args.allow_empty => {
            warn!("No records found, writing header-only workbook");
            (None, Vec::new())
        }
        Err(PontoError::Extraction(ExtractionError::NoRecords)) => {
            pb.finish_and_clear();
            anyhow::bail!(
                "No time-clock records found in {}. Nothing was written.",
                input.display()
            );
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.set_message("Writing workbook...");
    let writer = XlsxWriter::new(config.output.clone());
    match &extracted {
        Some(timesheet) => writer.write(timesheet, &output)?,
        None => writer.write_header_only(&config.columns, &output)?,
    }

    pb.finish_and_clear();

    for warning in &warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    match &extracted {
        Some(timesheet) => println!(
            "{} {} records extracted ({} method)",
            style("✓").green(),
            timesheet.len(),
            timesheet.method
        ),
        None => println!(
            "{} No records found, header row only",
            style("!").yellow()
        ),
    }
    println!(
        "{} Workbook written to {}",
        style("✓").green(),
        output.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
