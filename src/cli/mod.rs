//! CLI module
//!
//! Command-line entry point. Running the binary without arguments loads
//! `dl.yaml` from the working directory and runs the whole pipeline.
//!
//! # Options
//!
//! - `--config` / `SONGPLAY_LAKE_CONFIG` - alternative config file
//! - `--help`, `--version`

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
