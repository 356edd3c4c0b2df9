//! Validate command - check a deployment context without rendering it

use super::{CommandContext, ContextArgs};
use crate::cli::FormatArg;
use anyhow::Result;
use clap::Parser;
use sapdm::compute::ResourceType;
use sapdm::manifest::{generate_config, plan_volumes};
use serde::Serialize;

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Report format
    #[arg(long)]
    pub format: Option<FormatArg>,
}

/// Machine-readable validation outcome
#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    problems: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    resources: usize,
    disks: usize,
    region: String,
    subnetwork: String,
    public_ip: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let json = matches!(self.format, Some(FormatArg::Json));
        ctx.output.set_json_mode(json);

        let raw = self.context.load()?;
        let coercion = self.context.coercion(&ctx.config);

        ctx.output.banner("CONTEXT VALIDATION");
        ctx.output
            .info(&format!("Context: {}", self.context.context_file.display()));

        let problems = raw.problems(coercion);
        if !problems.is_empty() {
            let messages: Vec<String> = problems.iter().map(|p| p.to_string()).collect();
            if json {
                ctx.output.json(&ValidationReport {
                    valid: false,
                    problems: messages,
                    summary: None,
                })?;
            } else {
                ctx.output
                    .error(&format!("Found {} problem(s)", messages.len()));
                ctx.output.list("Problems", &messages);
            }
            return Ok(1);
        }

        let resolved = raw.resolve(coercion)?;
        let manifest = generate_config(&resolved, &ctx.config.template);

        let summary = Summary {
            resources: manifest.resources.len(),
            disks: manifest.count(ResourceType::Disk),
            region: resolved.region().to_string(),
            subnetwork: resolved.subnetwork_url(),
            public_ip: resolved.properties.public_ip,
        };

        if json {
            ctx.output.json(&ValidationReport {
                valid: true,
                problems: Vec::new(),
                summary: Some(summary),
            })?;
            return Ok(0);
        }

        ctx.output.section("Summary");
        ctx.output.table(
            &["Field", "Value"],
            &[
                vec!["Resources".to_string(), summary.resources.to_string()],
                vec!["Disks".to_string(), summary.disks.to_string()],
                vec!["Region".to_string(), summary.region],
                vec!["Subnetwork".to_string(), summary.subnetwork],
                vec!["Public IP".to_string(), summary.public_ip.to_string()],
            ],
        );

        ctx.output.section("Volumes");
        let rows: Vec<Vec<String>> = plan_volumes(&resolved.properties)
            .into_iter()
            .map(|v| {
                vec![
                    v.volume.drive().to_string(),
                    v.name,
                    v.size_gb.to_string(),
                    v.disk_type.to_string(),
                ]
            })
            .collect();
        ctx.output.table(&["Drive", "Disk", "GB", "Type"], &rows);

        let dangling = manifest.dangling_references();
        if !dangling.is_empty() {
            ctx.output.list("Unresolved disk references", &dangling);
            return Ok(1);
        }

        ctx.output.success("Deployment context is valid");
        Ok(0)
    }
}
