//! Simulation pipeline
//!
//! Fans out one task per project, invokes the per-provider generators,
//! reshapes their output with the record adjuster, consolidates
//! everything through the schema normalizer, and derives the report
//! bundle. Projects are independent: a failing project is logged and
//! contributes an empty result set instead of aborting the batch.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::adjuster::apply_pattern_adjustments;
use crate::analytics::{
    generate_distribution_report, generate_migration_analysis, generate_on_prem_comparison,
    generate_optimization_recommendations, generate_time_series_reports, CostComparisonRow,
    DistributionRow, MigrationProgressRow, Recommendation, TimeSeriesReports,
};
use crate::error::SimError;
use crate::generator::{GeneratorRequest, UsageGenerator};
use crate::models::{CloudProvider, ConsolidatedTable, MultiCloudProject, RawRecord};
use crate::observability::RunLogger;
use crate::schema::normalize;

/// Run-level knobs, passed explicitly into the pipeline entry point
#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    pub days_to_generate: u32,
    /// Total annual budget across all platforms, split by static percentage
    pub annual_budget: f64,
    /// Upper bound on the number of projects processed in one run
    pub max_projects: usize,
    pub on_prem_cost_simulation: bool,
    /// Relative cost jitter applied by the synthetic generators
    pub volatility_factor: f64,
    pub start_date: NaiveDate,
    pub seed: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            days_to_generate: 365,
            annual_budget: 150_000_000.0,
            max_projects: 16,
            on_prem_cost_simulation: true,
            volatility_factor: 0.02,
            // Callers normally derive this from the current date
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
            seed: 0,
        }
    }
}

/// Output of one cloud slice of one project
#[derive(Debug, Clone, Default)]
pub struct CloudRun {
    pub billing: Vec<RawRecord>,
    pub tags: Vec<RawRecord>,
}

/// Per-cloud results for one project; empty when the project failed
pub type ProjectResults = BTreeMap<CloudProvider, CloudRun>;

/// The full report bundle derived from one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReports {
    pub cloud_distribution: Vec<DistributionRow>,
    pub time_series: TimeSeriesReports,
    pub migration_analysis: Vec<MigrationProgressRow>,
    pub cloud_vs_onprem: Vec<CostComparisonRow>,
    pub optimization_recommendations: Vec<Recommendation>,
}

/// Everything a simulation run produces
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub results: BTreeMap<String, ProjectResults>,
    pub table: ConsolidatedTable,
    pub reports: SimulationReports,
}

/// Run the full simulation for a set of projects
///
/// Projects are processed on blocking tasks with no shared mutable state
/// and merged by project name afterward; ordering between projects does
/// not affect the outcome.
pub async fn run_simulation(
    projects: Vec<MultiCloudProject>,
    generators: Arc<Vec<Box<dyn UsageGenerator>>>,
    settings: SimulationSettings,
) -> Result<SimulationOutcome, SimError> {
    if settings.days_to_generate == 0 {
        return Err(SimError::InvalidSettings(
            "days_to_generate must be at least 1".to_string(),
        ));
    }

    let logger = RunLogger::new("simulation");
    let mut projects = projects;
    projects.truncate(settings.max_projects);
    logger.log_run_start(projects.len(), settings.days_to_generate, settings.annual_budget);

    let mut handles = Vec::with_capacity(projects.len());
    for project in &projects {
        let project = project.clone();
        let generators = Arc::clone(&generators);
        let logger = logger.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let name = project.name.clone();
            let results = match process_project(&project, &generators, settings, &logger) {
                Ok(results) => {
                    let record_count: usize = results.values().map(|r| r.billing.len()).sum();
                    logger.log_project_completed(&name, results.len(), record_count);
                    results
                }
                Err(err) => {
                    logger.log_project_failed(&name, &format!("{err:#}"));
                    ProjectResults::new()
                }
            };
            (name, results)
        }));
    }

    let mut results: BTreeMap<String, ProjectResults> = BTreeMap::new();
    for handle in handles {
        match handle.await {
            Ok((name, project_results)) => {
                results.insert(name, project_results);
            }
            Err(join_err) => {
                logger.log_project_failed("<unknown>", &join_err.to_string());
            }
        }
    }

    let table = consolidate(&results);
    let reports = build_reports(&table, &projects, settings);

    let completed = results.values().filter(|r| !r.is_empty()).count();
    logger.log_run_summary(completed, table.len());

    Ok(SimulationOutcome {
        results,
        table,
        reports,
    })
}

/// Process every configured cloud of one project
///
/// The generator is sized by the static percentage; the adjuster then
/// rescales each day's records to the pattern's dynamic share.
fn process_project(
    project: &MultiCloudProject,
    generators: &[Box<dyn UsageGenerator>],
    settings: SimulationSettings,
    logger: &RunLogger,
) -> Result<ProjectResults, SimError> {
    let mut results = ProjectResults::new();
    let day_count = settings.days_to_generate;

    for generator in generators {
        let cloud = generator.provider();
        let Some(allocation) = project.allocation(cloud) else {
            continue;
        };
        if allocation.services.is_empty() || allocation.stages.is_empty() {
            continue;
        }

        let request = GeneratorRequest::for_cloud(project, allocation);
        let cloud_budget = settings.annual_budget * allocation.percentage;
        let daily_budget = cloud_budget / 365.0;

        let mut output = generator
            .generate(
                &project.name,
                &request,
                day_count,
                settings.start_date,
                daily_budget,
            )
            .map_err(|source| SimError::Generation {
                project: project.name.clone(),
                cloud,
                source,
            })?;

        for day_index in 0..day_count {
            apply_pattern_adjustments(
                &mut output.billing,
                cloud,
                project,
                day_index,
                day_count,
                settings.start_date,
            );
        }

        logger.log_generation(&project.name, cloud, output.billing.len());
        results.insert(
            cloud,
            CloudRun {
                billing: output.billing,
                tags: output.tags,
            },
        );
    }

    Ok(results)
}

/// Normalize all provider outputs into one canonical table
fn consolidate(results: &BTreeMap<String, ProjectResults>) -> ConsolidatedTable {
    let mut table = ConsolidatedTable::new();
    for (project_name, project_results) in results {
        for (&cloud, run) in project_results {
            for record in &run.billing {
                table.push(normalize(record, cloud, project_name));
            }
        }
    }
    table
}

fn build_reports(
    table: &ConsolidatedTable,
    projects: &[MultiCloudProject],
    settings: SimulationSettings,
) -> SimulationReports {
    let cloud_vs_onprem = if settings.on_prem_cost_simulation {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        generate_on_prem_comparison(table, projects, &mut rng)
    } else {
        Vec::new()
    };

    SimulationReports {
        cloud_distribution: generate_distribution_report(table),
        time_series: generate_time_series_reports(table),
        migration_analysis: generate_migration_analysis(table, projects),
        cloud_vs_onprem,
        optimization_recommendations: generate_optimization_recommendations(table, projects),
    }
}
