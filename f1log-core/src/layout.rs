//! Protocol layout tables
//!
//! Every byte width and field offset the decoders rely on lives here as
//! data rather than code: supporting another game generation means
//! adding a constant set, not editing decode logic. All multi-byte
//! fields are little-endian. A capture must be decoded with the layout
//! of the game that produced it; a mismatch silently corrupts every
//! downstream value, so callers pin exactly one layout per run.

/// Packet kind discriminator carried in byte 6 of every header.
///
/// Only the kinds this tool dispatches on get a named variant; anything
/// else is carried as `Other` and skipped without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    /// Session status: weather, track, session type.
    Session,
    /// Car-slot to driver-identity table.
    Participants,
    /// Per-car instantaneous vehicle telemetry.
    CarTelemetry,
    /// Any kind this tool does not decode.
    Other(u8),
}

impl PacketKind {
    pub fn from_u8(id: u8) -> Self {
        match id {
            1 => PacketKind::Session,
            4 => PacketKind::Participants,
            6 => PacketKind::CarTelemetry,
            other => PacketKind::Other(other),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            PacketKind::Session => 1,
            PacketKind::Participants => 4,
            PacketKind::CarTelemetry => 6,
            PacketKind::Other(id) => *id,
        }
    }
}

/// Placement of the participant slot array within a participants payload.
#[derive(Debug, Clone)]
pub struct ParticipantSlotLayout {
    /// Bytes between the end of the header and the first slot.
    pub table_offset: usize,
    /// Width of one participant slot.
    pub slot_len: usize,
    /// Offset of the display-name field within a slot.
    pub name_offset: usize,
    /// Fixed width of the name field (UTF-8, NUL-terminated).
    pub name_len: usize,
}

/// Field offsets within one car-telemetry slot.
#[derive(Debug, Clone)]
pub struct TelemetrySlotLayout {
    /// Width of one telemetry slot.
    pub slot_len: usize,
    /// Speed in km/h, `u16`.
    pub speed: usize,
    /// Throttle 0.0..=1.0, `f32`.
    pub throttle: usize,
    /// Steering -1.0..=1.0, `f32`.
    pub steer: usize,
    /// Brake 0.0..=1.0, `f32`.
    pub brake: usize,
    /// Gear, `i8` (-1 reverse, 0 neutral).
    pub gear: usize,
    /// Engine RPM, `u16`.
    pub rpm: usize,
}

/// One pinned protocol generation: all widths and offsets the decoders
/// need to walk a captured packet.
#[derive(Debug, Clone)]
pub struct ProtocolLayout {
    /// Name accepted on the command line (e.g. `f1-2025`).
    pub name: &'static str,
    /// Fixed header width shared by every packet kind.
    pub header_len: usize,
    /// Fixed car-slot capacity of the per-car payload arrays.
    pub num_slots: usize,
    pub participants: ParticipantSlotLayout,
    pub telemetry: TelemetrySlotLayout,
}

impl ProtocolLayout {
    /// Look up a pinned layout by its command-line name.
    pub fn by_name(name: &str) -> Option<&'static ProtocolLayout> {
        LAYOUTS.iter().find(|l| l.name == name)
    }

    /// Names of all pinned layouts, for help text and error messages.
    pub fn known_names() -> Vec<&'static str> {
        LAYOUTS.iter().map(|l| l.name).collect()
    }

    /// Minimum payload length a complete participants table requires.
    pub fn participants_payload_len(&self) -> usize {
        self.participants.table_offset + self.num_slots * self.participants.slot_len
    }
}

/// F1 25 captures: no active-car count before the participant array,
/// 48-byte participant slots with a 32-byte name field at offset 8,
/// 55-byte telemetry slots.
pub const F1_2025: ProtocolLayout = ProtocolLayout {
    name: "f1-2025",
    header_len: 29,
    num_slots: 22,
    participants: ParticipantSlotLayout {
        table_offset: 0,
        slot_len: 48,
        name_offset: 8,
        name_len: 32,
    },
    telemetry: TelemetrySlotLayout {
        slot_len: 55,
        speed: 0,
        throttle: 2,
        steer: 6,
        brake: 10,
        gear: 15,
        rpm: 16,
    },
};

/// F1 24 captures: a one-byte active-car count precedes the participant
/// array, 60-byte participant slots with a 48-byte name field at offset
/// 7, 60-byte telemetry slots. Field offsets within a telemetry slot
/// match F1 25; only the trailing per-wheel block differs.
pub const F1_2024: ProtocolLayout = ProtocolLayout {
    name: "f1-2024",
    header_len: 29,
    num_slots: 22,
    participants: ParticipantSlotLayout {
        table_offset: 1,
        slot_len: 60,
        name_offset: 7,
        name_len: 48,
    },
    telemetry: TelemetrySlotLayout {
        slot_len: 60,
        speed: 0,
        throttle: 2,
        steer: 6,
        brake: 10,
        gear: 15,
        rpm: 16,
    },
};

static LAYOUTS: &[ProtocolLayout] = &[F1_2025, F1_2024];
