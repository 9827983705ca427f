//! Participant table decoding
//!
//! A participants payload is a fixed-stride array of per-car identity
//! slots. Only the display name is extracted; the car slot index is the
//! array position, not a wire field.

use crate::bytes::read_fixed_string;
use f1log_core::{DecodeError, ParticipantEntry, ProtocolLayout};

/// Decode the full participant table from the payload following a
/// participants header.
///
/// Returns exactly `layout.num_slots` entries in slot order. Entries
/// whose name field is all padding come back with an empty name
/// (unoccupied slot). Fails with [`DecodeError::TruncatedPacket`] when
/// the payload cannot hold the complete table.
pub fn decode_participants(
    payload: &[u8],
    layout: &ProtocolLayout,
) -> Result<Vec<ParticipantEntry>, DecodeError> {
    let table = &layout.participants;
    let needed = layout.participants_payload_len();
    if payload.len() < needed {
        return Err(DecodeError::TruncatedPacket {
            needed,
            len: payload.len(),
        });
    }

    let mut entries = Vec::with_capacity(layout.num_slots);
    for slot in 0..layout.num_slots {
        let base = table.table_offset + slot * table.slot_len;
        let field = &payload[base + table.name_offset..base + table.name_offset + table.name_len];
        entries.push(ParticipantEntry {
            slot: slot as u8,
            name: read_fixed_string(field),
        });
    }
    Ok(entries)
}
