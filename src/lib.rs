//! # coursekit
//!
//! Small tools for course repositories: grading statistics computed from the
//! commit log of a grading repository, and a configurator that scaffolds
//! lesson slides and writes the Makefile building them.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Grading thresholds and exemption lists
pub mod config;
/// For running external programs
pub mod process;
/// For discovering lessons and generating their build files
pub mod slides;
/// For all things related to grading statistics
pub mod stats;
/// Utility functions for convenience
pub mod util;
