//! f1log
//!
//! Batch extractor: reconstructs per-driver telemetry time series from
//! a captured F1 UDP packet log and writes them to CSV.

use anyhow::{anyhow, Result};
use clap::Parser;
use f1log_cli::config::DriverFilter;
use f1log_cli::sink::{CsvSink, RowSink};
use f1log_cli::{extract, resolver};
use f1log_codec::CaptureLog;
use f1log_core::ProtocolLayout;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "f1log",
    about = "Extract per-driver telemetry time series from an F1 UDP capture log"
)]
struct Args {
    /// Capture log: one JSON object per line with a hex-encoded packet
    #[arg(long)]
    log: PathBuf,

    /// Driver filter config (JSON object with a "drivers" array)
    #[arg(long)]
    config: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "telemetry.csv")]
    out: PathBuf,

    /// Protocol generation of the capture
    #[arg(long, default_value = "f1-2025")]
    protocol: String,

    /// Resolve and print the driver roster, then exit without extracting
    #[arg(long)]
    list_drivers: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let layout = ProtocolLayout::by_name(&args.protocol).ok_or_else(|| {
        anyhow!(
            "unknown protocol {:?}; known protocols: {}",
            args.protocol,
            ProtocolLayout::known_names().join(", ")
        )
    })?;
    let filter = DriverFilter::from_path(&args.config)?;
    let log = CaptureLog::new(&args.log);

    info!(
        "resolving car slots in {} ({} layout)",
        args.log.display(),
        layout.name
    );
    let lineup = resolver::resolve(&log, layout, &filter)?;
    info!(
        "scanned {} packets ({} participants, {} session, {} lines skipped)",
        lineup.stats.packets,
        lineup.stats.participants_packets,
        lineup.stats.session_packets,
        lineup.stats.skipped_lines
    );
    if let Some(session) = &lineup.session {
        info!(
            "session context: type {}, track {}, {} m, {} laps, weather {}",
            session.session_type,
            session.track_id,
            session.track_length_m,
            session.total_laps,
            session.weather
        );
    }
    if let (Some(first), Some(last)) = (lineup.stats.first_capture, lineup.stats.last_capture) {
        info!("capture window: {} to {}", first, last);
    }

    if args.list_drivers {
        for (slot, name) in &lineup.roster {
            let marker = if lineup.matched_slots.contains(slot) {
                " *"
            } else {
                ""
            };
            println!("{slot:>2}  {name}{marker}");
        }
        return Ok(());
    }

    let mut sink = CsvSink::create(&args.out)?;
    let report = extract::extract(&log, layout, &lineup, &mut sink)?;
    sink.finish()?;

    if report.rows == 0 {
        warn!("no rows written to {}", args.out.display());
    } else {
        info!(
            "wrote {} rows from {} telemetry packets to {}",
            report.rows,
            report.telemetry_packets,
            args.out.display()
        );
    }
    Ok(())
}
