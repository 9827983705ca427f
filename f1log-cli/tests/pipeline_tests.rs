//! End-to-end tests for the two-pass extraction pipeline over synthetic
//! capture streams.

use f1log_cli::config::DriverFilter;
use f1log_cli::extract::extract;
use f1log_cli::resolver::{resolve, ResolvedLineup};
use f1log_cli::sink::RowSink;
use f1log_codec::{encode_header, CaptureLog};
use f1log_core::layout::F1_2025;
use f1log_core::{CarTelemetry, PacketHeader, PacketKind, ResolveError, TelemetrySample};
use std::io::Write;

// ============================================================================
// Synthetic packet builders
// ============================================================================

fn header(kind: PacketKind, session_time: f32) -> PacketHeader {
    PacketHeader {
        packet_format: 2025,
        game_year: 25,
        game_major_version: 1,
        game_minor_version: 4,
        packet_version: 1,
        kind,
        session_uid: 0xABCD_EF01,
        session_time,
        frame_identifier: (session_time * 60.0) as u32,
        overall_frame_identifier: (session_time * 60.0) as u32,
        player_car_index: 0,
        secondary_player_car_index: 255,
    }
}

fn participants_packet(names: &[(usize, &str)], session_time: f32) -> Vec<u8> {
    let mut bytes = encode_header(&header(PacketKind::Participants, session_time), &F1_2025);
    let table = &F1_2025.participants;
    let mut payload = vec![0u8; F1_2025.participants_payload_len()];
    for &(slot, name) in names {
        let start = table.table_offset + slot * table.slot_len + table.name_offset;
        payload[start..start + name.len()].copy_from_slice(name.as_bytes());
    }
    bytes.extend_from_slice(&payload);
    bytes
}

fn telemetry_record(speed: u16) -> CarTelemetry {
    CarTelemetry {
        speed,
        throttle: 0.8,
        steer: -0.1,
        brake: 0.0,
        gear: 6,
        rpm: 10_500,
    }
}

fn telemetry_payload(records: &[(usize, CarTelemetry)]) -> Vec<u8> {
    let fields = &F1_2025.telemetry;
    let mut payload = vec![0u8; F1_2025.num_slots * fields.slot_len];
    for &(slot, rec) in records {
        let base = slot * fields.slot_len;
        payload[base + fields.speed..base + fields.speed + 2]
            .copy_from_slice(&rec.speed.to_le_bytes());
        payload[base + fields.throttle..base + fields.throttle + 4]
            .copy_from_slice(&rec.throttle.to_le_bytes());
        payload[base + fields.steer..base + fields.steer + 4]
            .copy_from_slice(&rec.steer.to_le_bytes());
        payload[base + fields.brake..base + fields.brake + 4]
            .copy_from_slice(&rec.brake.to_le_bytes());
        payload[base + fields.gear] = rec.gear as u8;
        payload[base + fields.rpm..base + fields.rpm + 2].copy_from_slice(&rec.rpm.to_le_bytes());
    }
    payload
}

fn telemetry_packet(records: &[(usize, CarTelemetry)], session_time: f32) -> Vec<u8> {
    let mut bytes = encode_header(&header(PacketKind::CarTelemetry, session_time), &F1_2025);
    bytes.extend_from_slice(&telemetry_payload(records));
    bytes
}

fn write_capture(packets: &[Vec<u8>]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for packet in packets {
        writeln!(file, r#"{{"packet_hex": "{}"}}"#, hex::encode(packet)).unwrap();
    }
    file.flush().unwrap();
    file
}

fn filter(names: &[&str]) -> DriverFilter {
    DriverFilter::from_names(names.iter().map(|n| n.to_string()).collect()).unwrap()
}

#[derive(Default)]
struct CollectSink(Vec<TelemetrySample>);

impl RowSink for CollectSink {
    fn write(&mut self, row: &TelemetrySample) -> anyhow::Result<()> {
        self.0.push(row.clone());
        Ok(())
    }
}

fn run_pipeline(packets: &[Vec<u8>], wanted: &[&str]) -> anyhow::Result<Vec<TelemetrySample>> {
    let file = write_capture(packets);
    let log = CaptureLog::new(file.path());
    let lineup = resolve(&log, &F1_2025, &filter(wanted))?;
    let mut sink = CollectSink::default();
    extract(&log, &F1_2025, &lineup, &mut sink)?;
    Ok(sink.0)
}

// ============================================================================
// Pipeline behaviour
// ============================================================================

#[test]
fn test_one_row_per_matched_slot_per_telemetry_packet() {
    let packets = vec![
        participants_packet(&[(0, "Max Verstappen"), (3, "Test Driver")], 0.0),
        telemetry_packet(&[(0, telemetry_record(301)), (3, telemetry_record(287))], 1.0),
        telemetry_packet(&[(3, telemetry_record(290))], 2.0),
        telemetry_packet(&[(3, telemetry_record(293))], 3.0),
    ];
    let rows = run_pipeline(&packets, &["Test Driver"]).unwrap();

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.car_index, 3);
        assert_eq!(row.driver, "Test Driver");
    }
    // Packet-stream order is preserved.
    let times: Vec<f32> = rows.iter().map(|r| r.session_time).collect();
    assert_eq!(times, [1.0, 2.0, 3.0]);
    let speeds: Vec<u16> = rows.iter().map(|r| r.speed).collect();
    assert_eq!(speeds, [287, 290, 293]);
}

#[test]
fn test_decoded_fields_reach_the_row() {
    let packets = vec![
        participants_packet(&[(5, "Lando Norris")], 0.0),
        telemetry_packet(&[(5, telemetry_record(287))], 10.5),
    ];
    let rows = run_pipeline(&packets, &["Lando Norris"]).unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.session_time, 10.5);
    assert_eq!(row.speed, 287);
    assert_eq!(row.rpm, 10_500);
    assert_eq!(row.gear, 6);
    assert_eq!(row.throttle, 0.8);
    assert_eq!(row.brake, 0.0);
    assert_eq!(row.steer, -0.1);
}

#[test]
fn test_filter_is_case_insensitive() {
    let packets = vec![
        participants_packet(&[(3, "Lando Norris")], 0.0),
        telemetry_packet(&[(3, telemetry_record(280))], 1.0),
    ];
    let rows = run_pipeline(&packets, &["lando norris"]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].driver, "Lando Norris");
}

#[test]
fn test_last_participants_packet_wins() {
    // Slot 3 changes hands mid-capture; the later lineup is authoritative.
    let packets = vec![
        participants_packet(&[(3, "Lando Norris")], 0.0),
        participants_packet(&[(3, "Oscar Piastri")], 50.0),
        telemetry_packet(&[(3, telemetry_record(280))], 60.0),
    ];
    let rows = run_pipeline(&packets, &["Oscar Piastri"]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].driver, "Oscar Piastri");

    // The replaced name no longer maps to any slot.
    let err = run_pipeline(&packets, &["Lando Norris"]).unwrap_err();
    let resolve_err = err.downcast_ref::<ResolveError>().unwrap();
    match resolve_err {
        ResolveError::NoDriversMatched { seen, .. } => {
            // Both names were observed during the scan, so the error
            // can still point the user at the lineup change.
            assert!(seen.contains(&"Lando Norris".to_string()));
            assert!(seen.contains(&"Oscar Piastri".to_string()));
        }
    }
}

#[test]
fn test_rows_ordered_by_slot_within_a_packet() {
    let packets = vec![
        participants_packet(&[(2, "Test Driver"), (9, "Other Driver")], 0.0),
        telemetry_packet(
            &[(9, telemetry_record(250)), (2, telemetry_record(300))],
            1.0,
        ),
    ];
    let rows = run_pipeline(&packets, &["Test Driver", "Other Driver"]).unwrap();
    let indices: Vec<u8> = rows.iter().map(|r| r.car_index).collect();
    assert_eq!(indices, [2, 9]);
}

#[test]
fn test_truncated_slot_yields_no_row_without_aborting() {
    let full = telemetry_packet(&[(3, telemetry_record(290))], 2.0);

    // Cut the first telemetry packet off before slot 3's byte range.
    let mut truncated = telemetry_packet(&[(3, telemetry_record(280))], 1.0);
    truncated.truncate(F1_2025.header_len + 3 * F1_2025.telemetry.slot_len - 7);

    let packets = vec![
        participants_packet(&[(3, "Test Driver")], 0.0),
        truncated,
        full,
    ];
    let rows = run_pipeline(&packets, &["Test Driver"]).unwrap();

    // Only the intact packet contributes a row for slot 3.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].session_time, 2.0);
}

#[test]
fn test_no_participants_packet_fails_before_any_row() {
    let packets = vec![
        telemetry_packet(&[(3, telemetry_record(280))], 1.0),
        telemetry_packet(&[(3, telemetry_record(285))], 2.0),
    ];
    let file = write_capture(&packets);
    let log = CaptureLog::new(file.path());

    let err = resolve(&log, &F1_2025, &filter(&["Test Driver"])).unwrap_err();
    let resolve_err = err.downcast_ref::<ResolveError>().unwrap();
    match resolve_err {
        ResolveError::NoDriversMatched { wanted, seen } => {
            assert_eq!(wanted, &["Test Driver"]);
            assert!(seen.is_empty());
        }
    }
}

#[test]
fn test_unmatched_filter_reports_names_seen() {
    let packets = vec![participants_packet(
        &[(0, "Max Verstappen"), (1, "Charles Leclerc")],
        0.0,
    )];
    let file = write_capture(&packets);
    let log = CaptureLog::new(file.path());

    let err = resolve(&log, &F1_2025, &filter(&["Lewis Hamilton"])).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Lewis Hamilton"));
    assert!(msg.contains("Max Verstappen"));
    assert!(msg.contains("Charles Leclerc"));
}

#[test]
fn test_unknown_packet_kinds_are_ignored() {
    let mut event_packet = encode_header(&header(PacketKind::Other(3), 0.5), &F1_2025);
    event_packet.extend_from_slice(b"SSTA");

    let packets = vec![
        event_packet,
        participants_packet(&[(3, "Test Driver")], 1.0),
        telemetry_packet(&[(3, telemetry_record(280))], 2.0),
    ];
    let rows = run_pipeline(&packets, &["Test Driver"]).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_malformed_lines_are_skipped_mid_stream() {
    let participants = participants_packet(&[(3, "Test Driver")], 0.0);
    let telemetry = telemetry_packet(&[(3, telemetry_record(280))], 1.0);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"packet_hex": "{}"}}"#, hex::encode(&participants)).unwrap();
    writeln!(file, "not json").unwrap();
    writeln!(file, r#"{{"packet_hex": "0x??"}}"#).unwrap();
    writeln!(file, r#"{{"packet_hex": "{}"}}"#, hex::encode(&telemetry)).unwrap();
    file.flush().unwrap();

    let log = CaptureLog::new(file.path());
    let lineup = resolve(&log, &F1_2025, &filter(&["Test Driver"])).unwrap();
    assert_eq!(lineup.stats.skipped_lines, 2);

    let mut sink = CollectSink::default();
    let report = extract(&log, &F1_2025, &lineup, &mut sink).unwrap();
    assert_eq!(report.rows, 1);
}

#[test]
fn test_session_context_is_retained() {
    let mut session_packet = encode_header(&header(PacketKind::Session, 0.0), &F1_2025);
    let mut payload = vec![0u8; 32];
    payload[0] = 2; // weather
    payload[3] = 52; // total laps
    payload[4..6].copy_from_slice(&5891u16.to_le_bytes());
    payload[6] = 15; // race
    session_packet.extend_from_slice(&payload);

    let packets = vec![
        session_packet,
        participants_packet(&[(3, "Test Driver")], 1.0),
    ];
    let file = write_capture(&packets);
    let log = CaptureLog::new(file.path());
    let lineup: ResolvedLineup = resolve(&log, &F1_2025, &filter(&["Test Driver"])).unwrap();

    let session = lineup.session.unwrap();
    assert_eq!(session.total_laps, 52);
    assert_eq!(session.track_length_m, 5891);
    assert_eq!(session.session_type, 15);
    assert_eq!(lineup.stats.session_packets, 1);
}

#[test]
fn test_roster_covers_all_occupied_slots() {
    let packets = vec![participants_packet(
        &[(0, "Max Verstappen"), (3, "Test Driver"), (21, "Backmarker")],
        0.0,
    )];
    let file = write_capture(&packets);
    let log = CaptureLog::new(file.path());
    let lineup = resolve(&log, &F1_2025, &filter(&["Test Driver"])).unwrap();

    assert_eq!(lineup.roster.len(), 3);
    assert_eq!(lineup.driver(21), Some("Backmarker"));
    assert_eq!(lineup.matched_slots.iter().copied().collect::<Vec<_>>(), [3]);
}
