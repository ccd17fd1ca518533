//! The `simulate` command

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use mcsim_lib::models::MultiCloudProject;
use mcsim_lib::pipeline::{run_simulation, SimulationReports, SimulationSettings};
use mcsim_lib::synthetic::SyntheticGenerator;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{format_currency, format_percentage, print_heading, print_table, OutputFormat};

/// Row for the cloud distribution table
#[derive(Tabled, Serialize)]
struct DistributionRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Cloud")]
    cloud: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Row for the monthly spend table
#[derive(Tabled, Serialize)]
struct MonthlyRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Cloud")]
    cloud: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Row for the top-services table
#[derive(Tabled, Serialize)]
struct ServiceRow {
    #[tabled(rename = "Cloud")]
    cloud: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Row for the migration progress table
#[derive(Tabled, Serialize)]
struct MigrationRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Target")]
    target: String,
}

/// Row for the cloud vs on-premises table
#[derive(Tabled, Serialize)]
struct ComparisonRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Type")]
    cost_type: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Row for the recommendations table
#[derive(Tabled, Serialize)]
struct RecommendationRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Cloud")]
    cloud: String,
    #[tabled(rename = "Est. Savings")]
    estimated_savings: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Run the simulation and print its report bundle
pub async fn run(
    projects: Vec<MultiCloudProject>,
    settings: SimulationSettings,
    format: OutputFormat,
) -> Result<()> {
    let generators = Arc::new(SyntheticGenerator::all(
        settings.volatility_factor,
        settings.seed,
    ));
    let outcome = run_simulation(projects, generators, settings).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.reports)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_reports(&outcome.reports, outcome.table.len(), format);
        }
    }

    Ok(())
}

fn print_reports(reports: &SimulationReports, record_count: usize, format: OutputFormat) {
    println!(
        "Consolidated {} billing records",
        record_count.to_string().cyan()
    );

    print_heading("Cloud Distribution");
    let rows: Vec<DistributionRow> = reports
        .cloud_distribution
        .iter()
        .map(|r| DistributionRow {
            project: r.multi_cloud_project.clone(),
            cloud: r.cloud.to_string(),
            cost: format_currency(r.cost),
            share: format_percentage(r.percentage),
        })
        .collect();
    print_table(&rows, format);

    print_heading("Monthly Spend by Cloud");
    let rows: Vec<MonthlyRow> = reports
        .time_series
        .monthly_by_cloud
        .iter()
        .map(|r| MonthlyRow {
            month: r.month.format("%Y-%m").to_string(),
            cloud: r.cloud.to_string(),
            cost: format_currency(r.cost),
        })
        .collect();
    print_table(&rows, format);

    print_heading("Top Services");
    let mut services: Vec<_> = reports.time_series.service_distribution.clone();
    services.sort_by(|a, b| b.cost.total_cmp(&a.cost));
    services.truncate(10);
    let rows: Vec<ServiceRow> = services
        .iter()
        .map(|r| ServiceRow {
            cloud: r.cloud.to_string(),
            service: r.service.clone(),
            cost: format_currency(r.cost),
        })
        .collect();
    print_table(&rows, format);

    if !reports.migration_analysis.is_empty() {
        print_heading("Migration Progress");
        let rows: Vec<MigrationRow> = reports
            .migration_analysis
            .iter()
            .map(|r| MigrationRow {
                month: r.month.format("%Y-%m").to_string(),
                project: r.project.clone(),
                source: format_percentage(r.source_percentage),
                target: format_percentage(r.target_percentage),
            })
            .collect();
        print_table(&rows, format);
    }

    if !reports.cloud_vs_onprem.is_empty() {
        print_heading("Cloud vs On-Premises");
        let rows: Vec<ComparisonRow> = reports
            .cloud_vs_onprem
            .iter()
            .map(|r| ComparisonRow {
                month: r.month.format("%Y-%m").to_string(),
                project: r.project.clone(),
                cost_type: r.cost_type.as_str().to_string(),
                cost: format_currency(r.cost),
            })
            .collect();
        print_table(&rows, format);
    }

    print_heading("Optimization Recommendations");
    let rows: Vec<RecommendationRow> = reports
        .optimization_recommendations
        .iter()
        .map(|r| RecommendationRow {
            project: r.project.clone(),
            kind: r.kind.as_str().to_string(),
            cloud: r.cloud.to_string(),
            estimated_savings: format_currency(r.estimated_savings).green().to_string(),
            description: r.description.clone(),
        })
        .collect();
    print_table(&rows, format);

    let total_savings: f64 = reports
        .optimization_recommendations
        .iter()
        .map(|r| r.estimated_savings)
        .sum();
    println!(
        "{} {}",
        "Total estimated savings:".bold(),
        format_currency(total_savings).green().bold()
    );
}
