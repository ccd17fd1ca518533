//! The `patterns` command

use anyhow::Result;
use mcsim_lib::models::MultiCloudProject;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{format_percentage, print_table, print_warning, OutputFormat};

/// One configured project
#[derive(Tabled, Serialize)]
struct PatternRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Pattern")]
    pattern: String,
    #[tabled(rename = "Business Unit")]
    business_unit: String,
    #[tabled(rename = "Clouds")]
    clouds: String,
}

/// List the configured projects and their workload patterns
pub fn list_patterns(projects: &[MultiCloudProject], format: OutputFormat) -> Result<()> {
    if projects.is_empty() {
        print_warning("No projects configured");
        return Ok(());
    }

    let rows: Vec<PatternRow> = projects
        .iter()
        .map(|project| {
            let clouds = project
                .clouds
                .iter()
                .map(|(cloud, alloc)| {
                    format!("{cloud} {}", format_percentage(alloc.percentage * 100.0))
                })
                .collect::<Vec<_>>()
                .join(", ");
            PatternRow {
                project: project.name.clone(),
                pattern: project.pattern.kind().to_string(),
                business_unit: project.business_unit.clone(),
                clouds,
            }
        })
        .collect();

    print_table(&rows, format);
    Ok(())
}
