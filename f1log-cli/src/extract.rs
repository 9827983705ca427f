//! Telemetry extraction (pass 2)
//!
//! A second scan over the same capture, gated on the resolved lineup.
//! Rows are emitted in packet-stream order and in ascending slot order
//! within a packet, so the output is deterministic for a given capture
//! and filter.

use anyhow::{Context, Result};
use f1log_codec::{decode_car_telemetry, decode_header, CaptureLog};
use f1log_core::{PacketKind, ProtocolLayout, TelemetrySample};
use tracing::{debug, warn};

use crate::resolver::ResolvedLineup;
use crate::sink::RowSink;

/// Counters for the extraction pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractReport {
    pub rows: u64,
    pub telemetry_packets: u64,
}

/// Emit one row per matched car slot per telemetry packet.
///
/// Slots missing from a truncated payload yield nothing for that packet
/// and never abort the scan. An empty result set is reported as a
/// warning, not a failure: it usually means the filtered drivers never
/// appear in the telemetry, not that the capture is corrupt.
pub fn extract(
    log: &CaptureLog,
    layout: &ProtocolLayout,
    lineup: &ResolvedLineup,
    sink: &mut dyn RowSink,
) -> Result<ExtractReport> {
    let mut report = ExtractReport::default();

    let mut packets = log
        .packets()
        .with_context(|| format!("failed to open capture log {}", log.path().display()))?;
    while let Some(packet) = packets.next() {
        let packet = packet.context("failed to read capture log")?;

        let header = match decode_header(&packet.bytes, layout) {
            Ok(header) => header,
            // Pass 1 already warned about these.
            Err(err) => {
                debug!("skipping packet at line {}: {}", packet.line, err);
                continue;
            }
        };
        if header.kind != PacketKind::CarTelemetry {
            continue;
        }
        report.telemetry_packets += 1;

        let records = decode_car_telemetry(&packet.bytes[layout.header_len..], layout);
        for &slot in &lineup.matched_slots {
            let record = match records.get(slot as usize).copied().flatten() {
                Some(record) => record,
                None => continue,
            };
            let driver = match lineup.driver(slot) {
                Some(driver) => driver,
                None => continue,
            };
            sink.write(&TelemetrySample {
                session_time: header.session_time,
                car_index: slot,
                driver: driver.to_string(),
                speed: record.speed,
                rpm: record.rpm,
                gear: record.gear,
                throttle: record.throttle,
                brake: record.brake,
                steer: record.steer,
            })?;
            report.rows += 1;
        }
    }

    if report.rows == 0 {
        warn!("extraction produced no rows: matched drivers never appear in a telemetry packet");
    }
    Ok(report)
}
