//! Foldr headless host.
//!
//! Loads persisted widgets, wires them to the real filesystem through
//! [`CliHost`], and exposes widget operations as subcommands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;

pub use cli::{Cli, Command, run, run_from_env};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use host::CliHost;
