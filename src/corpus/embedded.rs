//! Embedded word list
//!
//! A small sample list compiled into the binary at build time.

/// Language tag the sample list is registered under
pub const SAMPLE_LANGUAGE: &str = "sample";

// Include generated word list from build script
include!(concat!(env!("OUT_DIR"), "/sample.rs"));
