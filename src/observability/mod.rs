//! Observability
//!
//! Counters for removal outcomes; no exporter, reporting stays in-process.

pub mod stats;
