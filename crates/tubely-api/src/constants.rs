//! API constants

/// Prefix every route is nested under.
pub const API_PREFIX: &str = "/api";

/// Headroom on top of the file limits for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;
