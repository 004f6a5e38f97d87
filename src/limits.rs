//! Fixed caps and the supported year window.

/// Most flexible holidays a user may avail.
pub const MAX_FLEXIBLE_LEAVES: usize = 3;

/// Most planned holidays a user's ledger may hold.
pub const MAX_PLANNED_LEAVES: usize = 27;

/// First day of the supported year window (inclusive).
pub const YEAR_START: &str = "2019-01-01";

/// Last day of the supported year window (inclusive).
pub const YEAR_END: &str = "2019-12-31";

/// Substring the date-range disambiguation heuristic matches on.
pub const SUPPORTED_YEAR: &str = "2019";

/// Upper bound on one inbound transport line.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Longest accepted free-text leave reason; longer input is truncated.
pub const MAX_REASON_LEN: usize = 512;
