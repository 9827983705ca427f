//! Packet header decoding
//!
//! The 29-byte header is shared by every packet kind and carries the
//! dispatch discriminator plus the session clock. Decoding is pure; the
//! payload starts at `layout.header_len`.

use crate::bytes::{read_f32, read_u16, read_u32, read_u64, read_u8};
use f1log_core::{DecodeError, PacketHeader, PacketKind, ProtocolLayout};

/// Decode the fixed-size header at offset 0 of a captured packet.
///
/// Fails with [`DecodeError::TruncatedPacket`] when the buffer is
/// shorter than the header width; unknown packet kinds are not an
/// error (they decode to [`PacketKind::Other`]).
pub fn decode_header(buf: &[u8], layout: &ProtocolLayout) -> Result<PacketHeader, DecodeError> {
    let truncated = || DecodeError::TruncatedPacket {
        needed: layout.header_len,
        len: buf.len(),
    };
    if buf.len() < layout.header_len {
        return Err(truncated());
    }

    Ok(PacketHeader {
        packet_format: read_u16(buf, 0).ok_or_else(truncated)?,
        game_year: read_u8(buf, 2).ok_or_else(truncated)?,
        game_major_version: read_u8(buf, 3).ok_or_else(truncated)?,
        game_minor_version: read_u8(buf, 4).ok_or_else(truncated)?,
        packet_version: read_u8(buf, 5).ok_or_else(truncated)?,
        kind: PacketKind::from_u8(read_u8(buf, 6).ok_or_else(truncated)?),
        session_uid: read_u64(buf, 7).ok_or_else(truncated)?,
        session_time: read_f32(buf, 15).ok_or_else(truncated)?,
        frame_identifier: read_u32(buf, 19).ok_or_else(truncated)?,
        overall_frame_identifier: read_u32(buf, 23).ok_or_else(truncated)?,
        player_car_index: read_u8(buf, 27).ok_or_else(truncated)?,
        secondary_player_car_index: read_u8(buf, 28).ok_or_else(truncated)?,
    })
}

/// Encode a header back into its wire layout.
///
/// The inverse of [`decode_header`]; used to build synthetic capture
/// streams and to check the decode/encode round-trip.
pub fn encode_header(header: &PacketHeader, layout: &ProtocolLayout) -> Vec<u8> {
    let mut buf = vec![0u8; layout.header_len];
    buf[0..2].copy_from_slice(&header.packet_format.to_le_bytes());
    buf[2] = header.game_year;
    buf[3] = header.game_major_version;
    buf[4] = header.game_minor_version;
    buf[5] = header.packet_version;
    buf[6] = header.kind.as_u8();
    buf[7..15].copy_from_slice(&header.session_uid.to_le_bytes());
    buf[15..19].copy_from_slice(&header.session_time.to_le_bytes());
    buf[19..23].copy_from_slice(&header.frame_identifier.to_le_bytes());
    buf[23..27].copy_from_slice(&header.overall_frame_identifier.to_le_bytes());
    buf[27] = header.player_car_index;
    buf[28] = header.secondary_player_car_index;
    buf
}
