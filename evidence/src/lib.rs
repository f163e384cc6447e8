//! Evidence threshold checks and verification time to evidence (VTE).
//!
//! Two independent analyses run over experiment logs:
//!
//! - **Threshold check**: participant records are scored for effect direction,
//!   replication, and sensor corroboration against fixed thresholds.
//! - **VTE**: milestone events per arm yield the time from start to completion
//!   and the difference between arms.
//!
//! The crate keeps the same split throughout:
//!
//! - **[`core`]**: Pure, deterministic logic over already-loaded records.
//! - **[`io`]**: Config and file loaders.
//!
//! [`report`] and [`cli`] turn core results into the user-facing output.

pub mod cli;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
