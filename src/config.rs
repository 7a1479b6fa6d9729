//! Configuration management for the file-type tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Preference file path resolution

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the file-type inspector
#[derive(Debug, Parser)]
#[command(name = "ftype")]
#[command(about = "Inspect how the editor classifies files")]
#[command(version)]
pub struct Args {
    /// Files to classify
    pub paths: Vec<PathBuf>,

    /// Explicit user preference file (overrides the config-dir default)
    #[arg(long, help = "Path to the user preference TOML file")]
    pub prefs_file: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep running and log live word-wrap changes
    #[arg(long)]
    pub watch: bool,

    /// Log level for the tool
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Files to classify
    pub paths: Vec<PathBuf>,
    /// User-global preference file
    pub user_prefs_path: Option<PathBuf>,
    /// Workspace preference file (./.ftype.toml)
    pub workspace_prefs_path: Option<PathBuf>,
    /// Emit JSON instead of the human report
    pub json: bool,
    /// Stay alive and log preference-driven changes
    pub watch: bool,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Explicit flag wins; otherwise the user config directory.
        let user_prefs_path = match args.prefs_file {
            Some(path) => Some(path),
            None => dirs::config_dir().map(|dir| dir.join("ftype").join("prefs.toml")),
        };

        let workspace_prefs_path = Some(std::env::current_dir()?.join(".ftype.toml"));

        Ok(Config {
            paths: args.paths,
            user_prefs_path,
            workspace_prefs_path,
            json: args.json,
            watch: args.watch,
            log_level: args.log_level,
        })
    }
}
