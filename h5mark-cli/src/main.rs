//! h5mark command-line interface.
//!
//! Headless counterpart of the desktop tool: inspect HDF5 datasets and
//! export them to CSV with region marks given on the command line.
#![allow(clippy::uninlined_format_args)]

use clap::{Parser, Subcommand};
use h5mark_core::{DatasetSummary, Mark, Rgba, Session};
use h5mark_io::CsvExporter;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    H5markIo(#[from] h5mark_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] h5mark_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Colors cycled through for marks given without one.
const MARK_PALETTE: [Rgba; 6] = [
    Rgba::RED,
    Rgba::BLUE,
    Rgba::GREEN,
    Rgba::ORANGE,
    Rgba::PURPLE,
    Rgba::CYAN,
];

/// A `--mark` argument: `XMIN:XMAX[:COLOR]`.
#[derive(Debug, Clone, PartialEq)]
struct MarkArg {
    xmin: f64,
    xmax: f64,
    color: Option<Rgba>,
}

impl MarkArg {
    fn into_mark(self, position: usize) -> h5mark_core::Result<Mark> {
        let color = self
            .color
            .unwrap_or(MARK_PALETTE[position % MARK_PALETTE.len()]);
        Mark::new(self.xmin, self.xmax, color)
    }
}

fn parse_mark_arg(value: &str) -> std::result::Result<MarkArg, String> {
    let mut parts = value.splitn(3, ':');
    let mut bound = |what: &str| -> std::result::Result<f64, String> {
        let text = parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or_else(|| format!("missing {what} in '{value}' (expected XMIN:XMAX[:COLOR])"))?;
        text.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid {what} '{text}': {e}"))
    };
    let xmin = bound("xmin")?;
    let xmax = bound("xmax")?;
    let color = parts
        .next()
        .map(str::parse::<Rgba>)
        .transpose()
        .map_err(|e| e.to_string())?;
    Ok(MarkArg { xmin, xmax, color })
}

/// Region-of-interest annotation for HDF5 datasets.
#[derive(Parser)]
#[command(name = "h5mark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an HDF5 file and the dataset it holds
    Info {
        /// Input HDF5 file
        input: PathBuf,

        /// Dataset or group to inspect (default: first top-level member)
        #[arg(short, long)]
        dataset: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a dataset to CSV with a mark color column
    Export {
        /// Input HDF5 file
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Dataset or group to export (default: first top-level member)
        #[arg(short, long)]
        dataset: Option<String>,

        /// Region mark as XMIN:XMAX[:COLOR]; may be repeated
        #[arg(short, long = "mark", value_parser = parse_mark_arg, allow_hyphen_values = true)]
        marks: Vec<MarkArg>,

        /// Field delimiter (single character, `\t` for tab)
        #[arg(long)]
        delimiter: Option<String>,

        /// Decimal places written for every value
        #[arg(long)]
        precision: Option<String>,
    },
}

#[derive(Serialize)]
struct InfoReport {
    file: PathBuf,
    members: Vec<String>,
    dataset: Option<String>,
    summary: DatasetSummary,
}

fn run_info(input: PathBuf, dataset: Option<String>, json: bool) -> Result<()> {
    let members = h5mark_io::list_members(&input)?;
    let loaded = h5mark_io::read_dataset_hdf5(&input, dataset.as_deref())?;
    let report = InfoReport {
        dataset: dataset.or_else(|| members.first().cloned()),
        file: input,
        members,
        summary: loaded.summary(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", report.file.display());
    println!("Members: {}", report.members.join(", "));
    if let Some(name) = &report.dataset {
        println!("Dataset: {}", name);
    }
    println!("Rows: {}", report.summary.rows);
    println!("Columns: {}", report.summary.headers.join(", "));
    if let (Some(lo), Some(hi)) = (report.summary.x_min, report.summary.x_max) {
        println!("X range: {} - {}", lo, hi);
    }
    Ok(())
}

fn run_export(
    input: &Path,
    output: &Path,
    dataset: Option<&str>,
    marks: Vec<MarkArg>,
    delimiter: Option<&str>,
    precision: Option<&str>,
) -> Result<()> {
    let mut session = Session::default();
    session.update_settings(delimiter.unwrap_or_default(), precision.unwrap_or_default())?;
    session.load_dataset(h5mark_io::read_dataset_hdf5(input, dataset)?);

    for (position, arg) in marks.into_iter().enumerate() {
        session.add_mark(arg.into_mark(position)?)?;
    }

    let rows = CsvExporter::new(session.settings()).export_to_path(output, &session)?;
    info!(
        "{} of {} rows covered by {} marks",
        session.index().marked_count(),
        rows,
        session.marks().len()
    );
    println!("Wrote {} rows to {}", rows, output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info {
            input,
            dataset,
            json,
        } => run_info(input, dataset, json),

        Commands::Export {
            input,
            output,
            dataset,
            marks,
            delimiter,
            precision,
        } => run_export(
            &input,
            &output,
            dataset.as_deref(),
            marks,
            delimiter.as_deref(),
            precision.as_deref(),
        ),
    }
}
