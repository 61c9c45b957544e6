use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Replays a YAML scenario against a fresh in-memory filesystem.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The scenario file to replay
    pub scenario: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Stop at the first operation that fails
    #[clap(long)]
    pub fail_fast: bool,
}
