//! Generate command - render the manifest for a deployment context

use super::{CommandContext, ContextArgs};
use crate::cli::FormatArg;
use anyhow::{Context, Result};
use clap::Parser;
use sapdm::error::Error;
use sapdm::manifest::{generate, OutputFormat};
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Manifest format (defaults to the configured format)
    #[arg(long)]
    pub format: Option<FormatArg>,

    /// Write the manifest to a file instead of stdout
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let raw = self.context.load()?;
        let coercion = self.context.coercion(&ctx.config);
        let format = self
            .format
            .map(OutputFormat::from)
            .unwrap_or(ctx.config.defaults.output_format);

        ctx.output.info(&format!(
            "Generating {} manifest from {}",
            format,
            self.context.context_file.display()
        ));
        ctx.output
            .debug(&format!("Boolean coercion: {}", coercion));

        let manifest = match generate(&raw, coercion, &ctx.config.template) {
            Ok(manifest) => manifest,
            Err(e) if e.is_validation_error() => {
                report_validation_error(ctx, &e);
                return Ok(1);
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            resources = manifest.resources.len(),
            format = %format,
            "manifest generated"
        );

        let rendered = manifest.render(format)?;
        match &self.out {
            Some(path) => {
                std::fs::write(path, &rendered)
                    .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
                ctx.output.success(&format!(
                    "Wrote {} resources to {}",
                    manifest.resources.len(),
                    path.display()
                ));
            }
            None => {
                print!("{}", rendered);
                if !rendered.ends_with('\n') {
                    println!();
                }
                ctx.output.flush();
            }
        }

        Ok(0)
    }
}

fn report_validation_error(ctx: &CommandContext, error: &Error) {
    match error.missing_properties() {
        Some(missing) => {
            ctx.output.error("Deployment context is incomplete");
            ctx.output.list("Missing required properties", missing);
        }
        None => ctx.output.error(&error.to_string()),
    }
    ctx.output
        .hint("Run 'sapdm validate' to see every problem in the context");
}
