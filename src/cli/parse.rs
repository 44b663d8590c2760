//! CLI parse: clap types for the project wizard. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Project wizard CLI - resolve generation settings and sync project resources
#[derive(Parser)]
#[command(name = "project-wizard")]
#[command(about = "Resolve template generation settings and sync project resources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Never prompt; any failure cancels the run
    #[arg(long)]
    pub non_interactive: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the configuration and print it
    Resolve {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run a full generation pass against an existing project directory
    Generate {
        /// Root of the generated project
        #[arg(long)]
        project: PathBuf,
        /// Candidate template item to check for inclusion (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a starter global configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Show what would be written without creating anything
        #[arg(long)]
        list: bool,
    },
}
