//! I/O helpers: configuration and input loaders.

pub mod config;
pub mod digest;
pub mod logs;
pub mod milestones;
