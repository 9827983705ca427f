//! Error taxonomy
//!
//! Per-record failures (`DecodeError`) are recovered locally by the
//! scanners: the offending packet or line is skipped and the stream
//! continues. Stream-level failures (`ResolveError`) surface to the
//! caller and stop the run before extraction.

use thiserror::Error;

/// A single packet or log line could not be decoded. Recoverable: the
/// scanner logs it and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is shorter than the structure requires.
    #[error("packet truncated: need {needed} bytes, have {len}")]
    TruncatedPacket { needed: usize, len: usize },

    /// A capture-log line could not be turned into packet bytes.
    #[error("malformed log line: {reason}")]
    MalformedLine { reason: String },
}

/// The resolution pass could not produce anything to extract. Fatal for
/// the run: there is no point scanning for telemetry.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No mapped participant name matched the configured filter (or the
    /// stream held no participants packet at all).
    #[error(
        "no drivers matched the filter [{}]; names seen: [{}]",
        .wanted.join(", "),
        .seen.join(", ")
    )]
    NoDriversMatched {
        /// The filter as configured.
        wanted: Vec<String>,
        /// Every distinct participant name observed in the stream.
        seen: Vec<String>,
    },
}
