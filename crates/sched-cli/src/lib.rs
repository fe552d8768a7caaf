//! Conference schedule timeline CLI library.
//!
//! This crate provides the CLI interface for the schedule timeline.

mod cli;
pub mod commands;
mod config;
pub mod load;

pub use cli::{Cli, Commands};
pub use config::Config;
