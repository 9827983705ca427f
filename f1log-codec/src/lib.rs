//! Packet decoders and capture-log reader for f1log
//!
//! Pure byte-level transformations: a captured packet in, typed records
//! out. All decoding is driven by a [`f1log_core::ProtocolLayout`] so
//! the same code serves every pinned protocol generation.

pub mod bytes;
pub mod header;
pub mod participants;
pub mod reader;
pub mod session;
pub mod telemetry;

pub use header::{decode_header, encode_header};
pub use participants::decode_participants;
pub use reader::{CaptureLog, RawPacket};
pub use session::decode_session;
pub use telemetry::decode_car_telemetry;
