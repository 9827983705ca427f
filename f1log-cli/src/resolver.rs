//! Car-index resolution (pass 1)
//!
//! Driver names live only in participants packets while telemetry is
//! keyed by transient car slot, so the whole stream is scanned once to
//! correlate the two before any extraction happens. Lineups can change
//! mid-capture (a session restart re-forms the grid), which is why the
//! last participants packet wins and the scan never exits early.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use f1log_codec::{decode_header, decode_participants, decode_session, CaptureLog};
use f1log_core::{PacketKind, ProtocolLayout, ResolveError, SessionInfo};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::config::DriverFilter;

/// Counters for one scan of the capture stream.
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    pub packets: u64,
    pub participants_packets: u64,
    pub session_packets: u64,
    pub skipped_lines: u64,
    /// Wall-clock capture window, when the log carries timestamps.
    pub first_capture: Option<DateTime<Utc>>,
    pub last_capture: Option<DateTime<Utc>>,
}

impl ScanStats {
    fn observe_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        if let Some(ts) = timestamp {
            if self.first_capture.is_none() {
                self.first_capture = Some(ts);
            }
            self.last_capture = Some(ts);
        }
    }
}

/// Immutable outcome of the resolution pass; read-only input to the
/// extraction pass.
#[derive(Debug, Clone)]
pub struct ResolvedLineup {
    /// Car slot -> driver display name, per the last participants packet.
    pub roster: BTreeMap<u8, String>,
    /// Car slots whose mapped name matched the filter.
    pub matched_slots: BTreeSet<u8>,
    /// Latest session context observed during the scan.
    pub session: Option<SessionInfo>,
    pub stats: ScanStats,
}

impl ResolvedLineup {
    pub fn driver(&self, slot: u8) -> Option<&str> {
        self.roster.get(&slot).map(String::as_str)
    }
}

/// Scan the full capture once and resolve which car slots belong to the
/// configured drivers.
///
/// Fails with [`ResolveError::NoDriversMatched`] when the stream holds
/// no participants packet at all or no mapped name matches the filter;
/// either way there is nothing meaningful to extract.
pub fn resolve(
    log: &CaptureLog,
    layout: &ProtocolLayout,
    filter: &DriverFilter,
) -> Result<ResolvedLineup> {
    let mut roster: BTreeMap<u8, String> = BTreeMap::new();
    let mut matched: BTreeSet<u8> = BTreeSet::new();
    let mut session: Option<SessionInfo> = None;
    let mut seen_names: BTreeSet<String> = BTreeSet::new();
    let mut stats = ScanStats::default();

    let mut packets = log
        .packets()
        .with_context(|| format!("failed to open capture log {}", log.path().display()))?;
    while let Some(packet) = packets.next() {
        let packet = packet.context("failed to read capture log")?;
        stats.packets += 1;
        stats.observe_timestamp(packet.timestamp);

        let header = match decode_header(&packet.bytes, layout) {
            Ok(header) => header,
            Err(err) => {
                warn!("skipping packet at line {}: {}", packet.line, err);
                continue;
            }
        };
        let payload = &packet.bytes[layout.header_len..];

        match header.kind {
            PacketKind::Participants => {
                let entries = match decode_participants(payload, layout) {
                    Ok(entries) => entries,
                    Err(err) => {
                        warn!(
                            "skipping participants packet at line {}: {}",
                            packet.line, err
                        );
                        continue;
                    }
                };
                stats.participants_packets += 1;

                // Wholesale replacement, not a merge: the newer lineup
                // is authoritative. All-padding name fields mark
                // unoccupied slots and stay out of the roster.
                roster.clear();
                for entry in entries {
                    if entry.name.is_empty() {
                        continue;
                    }
                    seen_names.insert(entry.name.clone());
                    roster.insert(entry.slot, entry.name);
                }
                matched = roster
                    .iter()
                    .filter(|(_, name)| filter.matches(name))
                    .map(|(slot, _)| *slot)
                    .collect();
                debug!(
                    "participants table at line {}: {} occupied slots, {} matched",
                    packet.line,
                    roster.len(),
                    matched.len()
                );
            }
            PacketKind::Session => match decode_session(payload) {
                Ok(info) => {
                    stats.session_packets += 1;
                    session = Some(info);
                }
                Err(err) => {
                    warn!("skipping session packet at line {}: {}", packet.line, err);
                }
            },
            _ => {}
        }
    }
    stats.skipped_lines = packets.skipped_lines();

    if matched.is_empty() {
        return Err(ResolveError::NoDriversMatched {
            wanted: filter.names().to_vec(),
            seen: seen_names.into_iter().collect(),
        }
        .into());
    }

    for slot in &matched {
        if let Some(name) = roster.get(slot) {
            info!("matched driver {:?} at car slot {}", name, slot);
        }
    }
    Ok(ResolvedLineup {
        roster,
        matched_slots: matched,
        session,
        stats,
    })
}
