//! Batch feature extraction CLI
//!
//! Reads a CSV with a mandatory `url` column and an optional `label` column,
//! runs every row through the probe engine, and writes a training-ready CSV
//! whose columns are `url`, the feature schema in order, then `label` when
//! the input had one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use phishguard_core::features::FEATURE_LAYOUT;
use phishguard_core::{BatchCoordinator, EngineConfig, FeatureAssembler, UrlInput};

#[derive(Parser, Debug)]
#[command(
    name = "phishguard-extract",
    version,
    about = "Extract phishing-detection features for a CSV of URLs"
)]
struct Args {
    /// Input CSV (requires a `url` column; `label` is passed through)
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    output: PathBuf,

    /// Concurrently in-flight URLs (default from PROBE_CONCURRENCY or 10)
    #[arg(short, long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = EngineConfig::from_env();
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    let inputs = read_inputs(&args.input)?;
    let labeled = inputs.iter().any(|i| i.label.is_some());
    log::info!(
        "Extracting features for {} URLs with {} workers",
        inputs.len(),
        config.concurrency
    );

    let assembler = Arc::new(FeatureAssembler::new(config.clone())?);
    let coordinator = BatchCoordinator::new(assembler, config.concurrency)?;
    let items = coordinator.run(inputs).await;

    write_output(&args.output, &items, labeled)?;
    log::info!("Features for {} URLs written to {}", items.len(), args.output.display());

    Ok(())
}

fn read_inputs(path: &PathBuf) -> Result<Vec<UrlInput>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input CSV {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let url_idx = match headers.iter().position(|h| h.trim() == "url") {
        Some(idx) => idx,
        None => bail!("input CSV must contain a `url` column"),
    };
    let label_idx = headers.iter().position(|h| h.trim() == "label");

    let mut inputs = Vec::new();
    for row in reader.records() {
        let row = row?;
        let url = row.get(url_idx).unwrap_or("").trim().to_string();
        let label = label_idx
            .and_then(|idx| row.get(idx))
            .and_then(|v| v.trim().parse::<i32>().ok());

        inputs.push(UrlInput { url, label });
    }

    Ok(inputs)
}

fn write_output(
    path: &PathBuf,
    items: &[phishguard_core::BatchItem],
    labeled: bool,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output CSV {}", path.display()))?;

    let mut header: Vec<&str> = Vec::with_capacity(FEATURE_LAYOUT.len() + 2);
    header.push("url");
    header.extend_from_slice(FEATURE_LAYOUT);
    if labeled {
        header.push("label");
    }
    writer.write_record(&header)?;

    for item in items {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        row.push(item.url.clone());
        for value in item.record.vector.as_slice() {
            row.push(format!("{}", *value as i64));
        }
        if labeled {
            row.push(item.label.map(|l| l.to_string()).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
