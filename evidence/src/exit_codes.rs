//! Stable exit codes for evidence CLI commands.

/// Report produced and every criterion met (or both arms computed).
pub const OK: i32 = 0;
/// Command failed due to malformed input, unreadable files, or bad config.
pub const INVALID: i32 = 1;
/// `evidence check` produced a report but the criteria are not met.
pub const NOT_MET: i32 = 2;
/// `evidence vte` produced a report but one or both arms are incomplete.
pub const PENDING: i32 = 3;
