//! Core application functionality
//!
//! This module contains the command line surface, user settings, error types
//! and the runner that ties a batch run together.

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::{ConfigFile, Settings};
pub use runner::run_app;
