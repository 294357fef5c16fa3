use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use ifc2inle::config::ConverterConfig;
use ifc2inle::conversion::{BatchReport, ConversionPipeline};
use ifc2inle::graph::RdfFormat;

/// Convert IFC building models into INLE natural-language name graphs.
#[derive(Parser)]
#[command(name = "ifc2inle", version, about)]
struct Cli {
    /// IFC source files (Turtle or N-Triples).
    #[arg(required = true, value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Class mapping table, overrides `mapping_file`.
    #[arg(short, long, value_name = "FILE")]
    mapping: Option<PathBuf>,

    /// Destination seed graph, overrides `inle_file`.
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Output format: turtle, ntriples.
    #[arg(short, long, value_name = "FORMAT", default_value = "turtle")]
    format: String,

    /// Write the batch report as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) -> std::io::Result<()> {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let format = RdfFormat::from_name(&cli.format)
        .ok_or_else(|| format!("Unknown format: {}. Use 'turtle' or 'ntriples'.", cli.format))?;

    let mut config = match &cli.config {
        Some(path) => ConverterConfig::from_file(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(mapping) = &cli.mapping {
        config.mapping_file = mapping.clone();
    }
    if let Some(seed) = &cli.seed {
        config.inle_file = seed.clone();
    }
    config.validate()?;

    let pipeline = ConversionPipeline::new(config)?.with_output_format(format);
    let batch = pipeline.convert_batch(&cli.inputs);

    if let Some(path) = &cli.report {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &batch)?;
    }
    Ok(batch)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(&cli) {
        eprintln!("Error: cannot open log file: {e}");
        process::exit(1);
    }

    let batch = match run(&cli) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if !cli.quiet {
        for report in &batch.converted {
            eprintln!(
                "Converted {} records into {} variants: {} -> {}",
                report.records,
                report.variants,
                report.input.display(),
                report.output.display()
            );
        }
        if batch.converted.len() > 1 {
            eprintln!(
                "Converted {} records into {} variants across {} files",
                batch.total_records(),
                batch.total_variants(),
                batch.converted.len()
            );
        }
    }
    for failed in &batch.failed {
        eprintln!("Failed {} ({}): {}", failed.input.display(), failed.stage, failed.error);
    }

    if !batch.is_success() {
        process::exit(1);
    }
}
