//! Shared utilities.
//!
//! Filesystem helpers used by the build strategies and test helpers.

pub mod fs;

#[cfg(test)]
pub mod testutil;
