//! # debtor-pdf
//!
//! Render an invoice, credit note or order from JSON.
//!
//! ```bash
//! debtor-pdf invoice.json -o invoice.pdf
//! debtor-pdf invoice.json -o invoice.pdf --header logo.png --uncompressed
//! debtor-pdf invoice.json -o invoice.pdf --paper letter
//! RUST_LOG=debug debtor-pdf invoice.json -o invoice.pdf
//! ```
//!
//! The input holds the debtor under `debtor` and, optionally, the online payments made
//! against it under `online_payments`.

use clap::Parser;
use debtor_pdf::{
    layout::PageMetrics, pagesize, render::DebtorPdf, Danish, Debtor, Image, OnlinePayment,
};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Render a debtor document as PDF
#[derive(Parser, Debug)]
#[command(name = "debtor-pdf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debtor as JSON
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Image printed in the page header
    #[arg(long, value_name = "IMAGE")]
    header: Option<PathBuf>,

    /// Regular and bold TrueType fonts to embed instead of Helvetica
    #[arg(long, num_args = 2, value_names = ["REGULAR", "BOLD"])]
    fonts: Option<Vec<PathBuf>>,

    /// Paper format: a4, a5, letter or legal
    #[arg(long, value_name = "PAPER", default_value = "a4")]
    paper: String,

    /// Write uncompressed content streams
    #[arg(long)]
    uncompressed: bool,
}

#[derive(Deserialize, Debug)]
struct Input {
    debtor: Debtor,
    #[serde(default)]
    online_payments: Vec<OnlinePayment>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown paper format `{0}`")]
    Paper(String),

    #[error("invalid input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] debtor_pdf::Error),
}

fn read(path: &PathBuf) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let paper = pagesize::by_name(&cli.paper).ok_or_else(|| CliError::Paper(cli.paper.clone()))?;
    let input: Input = serde_json::from_slice(&read(&cli.input)?)?;

    let mut renderer = DebtorPdf::new(Danish)
        .with_metrics(PageMetrics::default().with_page_size(paper))
        .with_compression(!cli.uncompressed);
    if let Some(header) = &cli.header {
        renderer = renderer.with_header(Image::from_bytes(read(header)?)?);
    }
    if let Some([regular, bold]) = cli.fonts.as_deref() {
        renderer = renderer.with_fonts(read(regular)?, read(bold)?)?;
    }

    let rendered = renderer.visit(&input.debtor, &input.online_payments)?;
    let pages = rendered.page_count();
    rendered.save(&cli.output)?;

    log::info!("wrote {} ({} page(s))", cli.output.display(), pages);
    Ok(())
}
