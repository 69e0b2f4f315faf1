//! Utilities shared across the Tandem packages.

pub mod logger;
pub mod time;
