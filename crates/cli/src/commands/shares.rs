//! The `shares` command
//!
//! Samples one project's pattern-driven cloud distribution along the
//! simulated timeline and prints the share of each cloud per sampled
//! day.

use anyhow::{bail, Result};
use mcsim_lib::distribution::distribute;
use mcsim_lib::models::{CloudProvider, MultiCloudProject};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{format_percentage, print_info, print_table, OutputFormat};

/// One sampled day of the share curve
#[derive(Tabled, Serialize)]
struct ShareRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "AWS")]
    aws: String,
    #[tabled(rename = "Azure")]
    azure: String,
    #[tabled(rename = "GCP")]
    gcp: String,
}

fn share_of(shares: &std::collections::BTreeMap<CloudProvider, f64>, cloud: CloudProvider) -> String {
    match shares.get(&cloud) {
        Some(&weight) => format_percentage(weight * 100.0),
        None => "-".to_string(),
    }
}

/// Print the daily cloud share curve of one project
pub fn show_shares(
    projects: &[MultiCloudProject],
    project_name: &str,
    days: u32,
    step: u32,
    format: OutputFormat,
) -> Result<()> {
    if days == 0 {
        bail!("days must be at least 1");
    }
    let step = step.max(1);

    let Some(project) = projects.iter().find(|p| p.name == project_name) else {
        bail!("no project named {project_name}");
    };

    print_info(&format!(
        "{} ({} pattern, {} day timeline)",
        project.name,
        project.pattern.kind(),
        days
    ));

    let mut rows = Vec::new();
    let mut day = 0;
    while day < days {
        let shares = distribute(project, day, days);
        rows.push(ShareRow {
            day,
            aws: share_of(&shares, CloudProvider::Aws),
            azure: share_of(&shares, CloudProvider::Azure),
            gcp: share_of(&shares, CloudProvider::Gcp),
        });
        day += step;
    }
    // Always include the final day so the curve's end state is visible
    if (days - 1) % step != 0 {
        let shares = distribute(project, days - 1, days);
        rows.push(ShareRow {
            day: days - 1,
            aws: share_of(&shares, CloudProvider::Aws),
            azure: share_of(&shares, CloudProvider::Azure),
            gcp: share_of(&shares, CloudProvider::Gcp),
        });
    }

    print_table(&rows, format);
    Ok(())
}
