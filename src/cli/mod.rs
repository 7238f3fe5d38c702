//! CLI module for textbook-qa
//!
//! Handles command-line argument parsing and configuration management.

pub mod config;
pub mod args;

pub use config::{Config, ReplConfig};
pub use args::{Args, Commands, Verbosity};
