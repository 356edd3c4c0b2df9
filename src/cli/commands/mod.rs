//! Subcommands module for sapdm CLI
//!
//! This module contains all the subcommand implementations.

pub mod generate;
pub mod properties;
pub mod validate;

use crate::cli::output::OutputFormatter;
use anyhow::{Context, Result};
use clap::Args;
use sapdm::config::Config;
use sapdm::context::{BoolCoercion, PropertyBag, RawContext};
use std::path::PathBuf;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let use_color = !cli.no_color && config.colors.enabled;
        let output = OutputFormatter::new(use_color, false, cli.verbosity());

        Self { config, output }
    }
}

/// Arguments that locate a deployment context and adjust it before use
#[derive(Args, Debug, Clone)]
pub struct ContextArgs {
    /// Deployment context file (YAML, JSON or TOML)
    pub context_file: PathBuf,

    /// Override a property (key=value or @file.yml)
    #[arg(short = 'p', long = "property", action = clap::ArgAction::Append)]
    pub properties: Vec<String>,

    /// Project to deploy into (overrides env.project)
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: Option<String>,

    /// Numeric project id (overrides env.project_number)
    #[arg(long)]
    pub project_number: Option<String>,

    /// Accept true/false, yes/no, 1/0 and on/off for flag properties
    #[arg(long)]
    pub lenient_booleans: bool,
}

impl ContextArgs {
    /// Load the context file and apply every command-line override
    pub fn load(&self) -> Result<RawContext> {
        let mut raw = RawContext::from_file(&self.context_file)?;

        for assignment in &self.properties {
            if let Some(file) = assignment.strip_prefix('@') {
                let content = std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read property file: {}", file))?;
                let bag: PropertyBag = serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse property file: {}", file))?;
                tracing::debug!(file, count = bag.len(), "merging property file");
                raw.properties.extend(bag);
            } else {
                raw.apply_override(assignment)?;
            }
        }

        if let Some(project) = &self.project {
            raw.env.insert("project".to_string(), project.clone().into());
        }
        if let Some(number) = &self.project_number {
            raw.env
                .insert("project_number".to_string(), number.clone().into());
        }

        Ok(raw)
    }

    /// Flag interpretation: the command line wins over configuration
    pub fn coercion(&self, config: &Config) -> BoolCoercion {
        if self.lenient_booleans {
            BoolCoercion::Lenient
        } else {
            config.defaults.bool_coercion
        }
    }
}
