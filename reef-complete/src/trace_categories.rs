//! Trace utilities

/// Trace category for completion target resolution.
pub const COMPLETION: &str = "completion";
/// Trace category for syntax error correction.
pub const CORRECTION: &str = "correction";
/// Trace category for parsing.
pub const PARSE: &str = "parse";
