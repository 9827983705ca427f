//! Little-endian primitive readers
//!
//! Offset-based reads returning `None` when the requested range falls
//! outside the buffer. Callers decide whether a miss is an error
//! (header fields) or a skip (truncated telemetry slots).

pub fn read_u8(buf: &[u8], offset: usize) -> Option<u8> {
    buf.get(offset).copied()
}

pub fn read_i8(buf: &[u8], offset: usize) -> Option<i8> {
    buf.get(offset).map(|&b| b as i8)
}

pub fn read_u16(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset + 2)?;
    Some(u16::from_le_bytes(bytes.try_into().ok()?))
}

pub fn read_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

pub fn read_u64(buf: &[u8], offset: usize) -> Option<u64> {
    let bytes = buf.get(offset..offset + 8)?;
    Some(u64::from_le_bytes(bytes.try_into().ok()?))
}

pub fn read_f32(buf: &[u8], offset: usize) -> Option<f32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(f32::from_le_bytes(bytes.try_into().ok()?))
}

/// Cut a fixed-width name field at the first NUL byte and decode the
/// prefix as UTF-8, replacing invalid sequences rather than failing
/// (capture tails often carry garbage past the terminator). The result
/// is whitespace-trimmed.
pub fn read_fixed_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).trim().to_string()
}
