//! f1log batch extraction application
//!
//! Two sequential scans over one capture log: the resolver pins down
//! which car slots belong to the configured drivers (last participants
//! packet wins), then the extractor emits one CSV row per matched slot
//! per telemetry packet.

pub mod config;
pub mod extract;
pub mod resolver;
pub mod sink;
