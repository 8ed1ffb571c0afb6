//! exif-inspect - print JSON reports for image files.
//!
//! Logs go to stderr so the JSON document on stdout stays parseable.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_inspect::{inspect_files, BatchReport, Config, MetadataRecord};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.log_filter());

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let batch = inspect_files(&config.paths);
    info!(
        inspected = batch.items.len(),
        unsupported = batch.unsupported.len(),
        read_failures = batch.read_failures.len(),
        "Inspection finished"
    );

    let written = if config.metadata_only {
        write_json(&metadata_view(&batch), config.pretty)
    } else {
        write_json(&batch, config.pretty)
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Decoded metadata keyed by path; `null` for files that could not be read.
fn metadata_view(batch: &BatchReport) -> BTreeMap<String, Option<&MetadataRecord>> {
    batch
        .items
        .iter()
        .map(|item| {
            let exif = item.report.as_ref().map(|report| &report.exif);
            (item.path.display().to_string(), exif)
        })
        .collect()
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    out.flush()
}

/// Initialize the tracing/logging subsystem.
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
