//! Utility functions shared by the CLI.
//!
//! ## Modules
//!
//! - [`config`] - JSON build configuration in the user config directory
//! - [`progress`] - Phase spinner (no-op without the `progress` feature)

pub mod config;
pub mod progress;

pub use config::*;
pub use progress::Spinner;
