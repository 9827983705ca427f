//! Capture-log container reader
//!
//! A capture is a text file with one JSON object per line, carrying at
//! least `packet_hex` — the hex encoding of one captured UDP packet —
//! and optionally a wall-clock `timestamp`. Malformed lines are skipped
//! with a warning and counted; a capture is never rejected wholesale
//! for one bad line.

use chrono::{DateTime, Utc};
use f1log_core::DecodeError;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize)]
struct CaptureLine {
    packet_hex: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// One captured packet, decoded from its log line.
#[derive(Debug, Clone)]
pub struct RawPacket {
    /// 1-based line number in the capture log.
    pub line: usize,
    /// Raw packet bytes.
    pub bytes: Vec<u8>,
    /// Wall-clock capture timestamp, when the capture tool recorded one.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Handle to a capture-log file.
///
/// `packets()` opens a fresh reader each time, so the resolution and
/// extraction passes can walk the same file independently.
#[derive(Debug, Clone)]
pub struct CaptureLog {
    path: PathBuf,
}

impl CaptureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start a scan over the capture from the first line.
    pub fn packets(&self) -> std::io::Result<PacketIter> {
        let file = File::open(&self.path)?;
        Ok(PacketIter {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            skipped: 0,
        })
    }
}

/// Iterator over the decodable packets of one capture scan.
pub struct PacketIter {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    skipped: u64,
}

impl PacketIter {
    /// Malformed lines skipped so far in this scan.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for PacketIter {
    type Item = std::io::Result<RawPacket>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            self.line_no += 1;

            // Capture tools occasionally emit a BOM on the first line
            // and blank separator lines; neither is worth a warning.
            let trimmed = line.trim_start_matches('\u{feff}').trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_line(trimmed) {
                Ok((bytes, timestamp)) => {
                    return Some(Ok(RawPacket {
                        line: self.line_no,
                        bytes,
                        timestamp,
                    }))
                }
                Err(err) => {
                    self.skipped += 1;
                    warn!("skipping capture line {}: {}", self.line_no, err);
                }
            }
        }
    }
}

fn parse_line(line: &str) -> Result<(Vec<u8>, Option<DateTime<Utc>>), DecodeError> {
    let parsed: CaptureLine =
        serde_json::from_str(line).map_err(|err| DecodeError::MalformedLine {
            reason: format!("invalid JSON: {err}"),
        })?;
    let bytes = hex::decode(parsed.packet_hex.trim()).map_err(|err| DecodeError::MalformedLine {
        reason: format!("invalid packet_hex: {err}"),
    })?;
    Ok((bytes, parsed.timestamp))
}
