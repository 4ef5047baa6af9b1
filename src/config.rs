use clap::Parser;

use crate::storage::DATABASE_NAME;

/// Two-player chess on the terminal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// SQLite file holding the results of finished matches
    #[arg(long, default_value = DATABASE_NAME)]
    pub database: String,

    /// Keep results in memory only
    #[arg(long)]
    pub in_memory: bool,

    /// Name of the first player (White); asked for when missing
    #[arg(long)]
    pub white: Option<String>,

    /// Name of the second player (Black); asked for when missing
    #[arg(long)]
    pub black: Option<String>,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
