//! Output row sinks
//!
//! Sinks append extraction rows to a destination. CSV is the production
//! sink; tests collect rows in memory behind the same trait.

use anyhow::{Context, Result};
use f1log_core::TelemetrySample;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed output column order. Part of the external contract; downstream
/// consumers depend on it.
pub const COLUMNS: [&str; 9] = [
    "session_time",
    "car_index",
    "driver",
    "speed",
    "rpm",
    "gear",
    "throttle",
    "brake",
    "steer",
];

/// Append-only sink for extraction rows.
pub trait RowSink {
    fn write(&mut self, row: &TelemetrySample) -> Result<()>;

    /// Flush buffered rows to the destination.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// CSV file sink: header row written once at creation, one line per
/// sample after that.
pub struct CsvSink {
    out: BufWriter<File>,
}

impl CsvSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", COLUMNS.join(","))?;
        Ok(Self { out })
    }
}

impl RowSink for CsvSink {
    fn write(&mut self, row: &TelemetrySample) -> Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{},{},{}",
            row.session_time,
            row.car_index,
            csv_field(&row.driver),
            row.speed,
            row.rpm,
            row.gear,
            row.throttle,
            row.brake,
            row.steer
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Quote a text field only when it would break the row.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
