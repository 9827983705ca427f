//! Session packet decoding
//!
//! Only the leading fields are read: they sit at the same offsets in
//! every supported protocol generation, while the remainder of the
//! session payload varies per version. Enough for run context (track,
//! session type, weather) without another versioned table.

use crate::bytes::{read_i8, read_u16, read_u8};
use f1log_core::{DecodeError, SessionInfo};

/// Payload bytes occupied by the version-stable leading fields.
const SESSION_LEAD_LEN: usize = 8;

/// Decode the leading fields of the payload following a session header.
pub fn decode_session(payload: &[u8]) -> Result<SessionInfo, DecodeError> {
    let truncated = || DecodeError::TruncatedPacket {
        needed: SESSION_LEAD_LEN,
        len: payload.len(),
    };
    if payload.len() < SESSION_LEAD_LEN {
        return Err(truncated());
    }

    Ok(SessionInfo {
        weather: read_u8(payload, 0).ok_or_else(truncated)?,
        track_temperature: read_i8(payload, 1).ok_or_else(truncated)?,
        air_temperature: read_i8(payload, 2).ok_or_else(truncated)?,
        total_laps: read_u8(payload, 3).ok_or_else(truncated)?,
        track_length_m: read_u16(payload, 4).ok_or_else(truncated)?,
        session_type: read_u8(payload, 6).ok_or_else(truncated)?,
        track_id: read_i8(payload, 7).ok_or_else(truncated)?,
    })
}
