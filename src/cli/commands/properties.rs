//! Properties command - list the inputs a deployment context accepts

use super::CommandContext;
use crate::cli::FormatArg;
use anyhow::Result;
use clap::Parser;
use sapdm::context::{PROPERTY_CONTRACT, REQUIRED_ENV};
use sapdm::manifest::VOLUMES;

/// Arguments for the properties command
#[derive(Parser, Debug, Clone)]
pub struct PropertiesArgs {
    /// Listing format
    #[arg(long)]
    pub format: Option<FormatArg>,

    /// Also list the disk volumes and the properties that size them
    #[arg(long)]
    pub volumes: bool,
}

impl PropertiesArgs {
    /// Execute the properties command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        if matches!(self.format, Some(FormatArg::Json)) {
            ctx.output.json(&serde_json::json!({
                "properties": PROPERTY_CONTRACT,
                "env": REQUIRED_ENV,
            }))?;
            return Ok(0);
        }

        ctx.output.section("Properties");
        let rows: Vec<Vec<String>> = PROPERTY_CONTRACT
            .iter()
            .map(|spec| {
                vec![
                    spec.name.to_string(),
                    if spec.required { "yes" } else { "no" }.to_string(),
                    spec.kind.to_string(),
                    spec.description.to_string(),
                ]
            })
            .collect();
        ctx.output
            .table(&["Name", "Required", "Type", "Description"], &rows);

        ctx.output.list(
            "Required environment",
            &REQUIRED_ENV
                .iter()
                .map(|name| format!("env.{}", name))
                .collect::<Vec<_>>(),
        );

        if self.volumes {
            ctx.output.section("Volumes");
            let rows: Vec<Vec<String>> = VOLUMES
                .iter()
                .map(|v| {
                    vec![
                        v.drive().to_string(),
                        v.suffix().to_string(),
                        v.size_property().to_string(),
                        if v.is_optional() { "yes" } else { "no" }.to_string(),
                        v.purpose().to_string(),
                    ]
                })
                .collect();
            ctx.output.table(
                &["Drive", "Suffix", "Sized by", "Optional", "Purpose"],
                &rows,
            );
        }

        Ok(0)
    }
}
