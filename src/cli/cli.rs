use std::path::PathBuf;

use clap::Parser;

use crate::cli::LogLevel;

/// Build an in-memory disk from a YAML fixture and print its tree.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// YAML fixture describing the disk layout
    pub fixture: PathBuf,
    /// Directory to list, recursively
    #[clap(long, short, default_value = "/")]
    pub path: String,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
