//! CLI module for sapdm
//!
//! This module provides the command-line interface for sapdm,
//! including argument parsing and subcommand handling.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sapdm - Deployment Manager manifests for SAP DB2 on Windows
///
/// Validates a deployment context and renders the disks and instance
/// Deployment Manager needs to stand up a DB2 server.
#[derive(Parser, Debug, Clone)]
#[command(name = "sapdm")]
#[command(version)]
#[command(about = "Generate Deployment Manager manifests for SAP DB2 on Windows", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "SAPDM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Serialization format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for sapdm::manifest::OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the manifest for a deployment context
    Generate(commands::generate::GenerateArgs),

    /// Check a deployment context without rendering it
    Validate(commands::validate::ValidateArgs),

    /// List the properties a deployment context accepts
    Properties(commands::properties::PropertiesArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}
