//! Car telemetry decoding
//!
//! Symmetric to the participant table but tolerant per slot: truncated
//! capture files are common, so a slot whose byte range falls beyond
//! the payload is skipped on its own rather than aborting the packet.

use crate::bytes::{read_f32, read_i8, read_u16};
use f1log_core::{CarTelemetry, ProtocolLayout};

/// Decode the per-car telemetry array from the payload following a
/// car-telemetry header.
///
/// Returns one entry per car slot, `None` where the payload ends before
/// the slot's byte range.
pub fn decode_car_telemetry(payload: &[u8], layout: &ProtocolLayout) -> Vec<Option<CarTelemetry>> {
    let fields = &layout.telemetry;
    (0..layout.num_slots)
        .map(|slot| {
            let base = slot * fields.slot_len;
            let slot_buf = payload.get(base..base + fields.slot_len)?;
            Some(CarTelemetry {
                speed: read_u16(slot_buf, fields.speed)?,
                throttle: read_f32(slot_buf, fields.throttle)?,
                steer: read_f32(slot_buf, fields.steer)?,
                brake: read_f32(slot_buf, fields.brake)?,
                gear: read_i8(slot_buf, fields.gear)?,
                rpm: read_u16(slot_buf, fields.rpm)?,
            })
        })
        .collect()
}
