//! Typed records decoded from captured packets
//!
//! These are plain protocol-faithful structs: values keep the units the
//! wire format uses (km/h speeds, 0..1 pedal floats). Every record is
//! decoded fresh per packet and never mutated afterwards.

use crate::layout::PacketKind;
use serde::Serialize;

/// Fixed-size header at offset 0 of every captured packet.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketHeader {
    /// Packet format version, e.g. 2025.
    pub packet_format: u16,
    /// Last two digits of the game year, e.g. 25.
    pub game_year: u8,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    /// Version of this packet kind's payload structure.
    pub packet_version: u8,
    /// Payload discriminator; the sole dispatch key downstream.
    pub kind: PacketKind,
    /// Unique identifier of the session this packet belongs to.
    pub session_uid: u64,
    /// Seconds elapsed since session start.
    pub session_time: f32,
    /// Frame the data was retrieved on.
    pub frame_identifier: u32,
    /// Frame identifier that does not reset on flashbacks.
    pub overall_frame_identifier: u32,
    /// Car slot of the player's own car.
    pub player_car_index: u8,
    /// Car slot of the secondary player, 255 when absent.
    pub secondary_player_car_index: u8,
}

/// One slot of the participants table. The car slot index is positional
/// within the packet, not stored on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub slot: u8,
    /// Display name, already NUL-cut and whitespace-trimmed. Empty for
    /// unoccupied slots.
    pub name: String,
}

/// The six tracked fields of one car-telemetry slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarTelemetry {
    /// Speed in km/h.
    pub speed: u16,
    /// Throttle application, 0.0..=1.0.
    pub throttle: f32,
    /// Steering, -1.0 (full left) ..= 1.0 (full right).
    pub steer: f32,
    /// Brake application, 0.0..=1.0.
    pub brake: f32,
    /// Selected gear: -1 reverse, 0 neutral, 1.. forward.
    pub gear: i8,
    /// Engine RPM.
    pub rpm: u16,
}

/// Version-stable leading fields of a session packet, kept for run
/// context. Enum-coded fields (weather, session type, track id) are
/// carried raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub weather: u8,
    /// Track temperature in degrees Celsius.
    pub track_temperature: i8,
    /// Air temperature in degrees Celsius.
    pub air_temperature: i8,
    pub total_laps: u8,
    /// Track length in metres.
    pub track_length_m: u16,
    pub session_type: u8,
    pub track_id: i8,
}

/// One output row of the extraction pipeline.
///
/// Field order is the CSV column contract: session_time, car_index,
/// driver, speed, rpm, gear, throttle, brake, steer. Downstream
/// consumers depend on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySample {
    pub session_time: f32,
    pub car_index: u8,
    pub driver: String,
    pub speed: u16,
    pub rpm: u16,
    pub gear: i8,
    pub throttle: f32,
    pub brake: f32,
    pub steer: f32,
}
