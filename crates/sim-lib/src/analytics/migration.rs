//! Migration progress analysis
//!
//! For projects whose pattern is a migration, pivots month-bucketed cost
//! into source/target columns and derives the share of spend already on
//! the target cloud.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ConsolidatedTable, MultiCloudProject};
use crate::pattern::WorkloadPattern;

use super::{month_end, parse_record_date};

/// One month of migration progress for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationProgressRow {
    pub month: NaiveDate,
    pub project: String,
    pub source_percentage: f64,
    pub target_percentage: f64,
    /// Alias of `target_percentage`, the headline progress metric
    pub migration_progress: f64,
}

/// Derive migration-progress curves for all migration projects
///
/// Projects without both a source and a target cloud configured are
/// skipped, as are months with no spend on either cloud.
pub fn generate_migration_analysis(
    table: &ConsolidatedTable,
    projects: &[MultiCloudProject],
) -> Vec<MigrationProgressRow> {
    let mut rows = Vec::new();

    for project in projects {
        let WorkloadPattern::Migration(params) = &project.pattern else {
            continue;
        };
        let (Some(source), Some(target)) = (params.source_cloud, params.target_cloud) else {
            continue;
        };

        // (source cost, target cost) per month
        let mut monthly: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for record in table.iter() {
            if record.multi_cloud_project != project.name {
                continue;
            }
            let Some(date) = parse_record_date(&record.date) else {
                continue;
            };
            let bucket = monthly.entry(month_end(date)).or_insert((0.0, 0.0));
            if record.cloud == source {
                bucket.0 += record.cost;
            } else if record.cloud == target {
                bucket.1 += record.cost;
            }
        }

        for (month, (source_cost, target_cost)) in monthly {
            let combined = source_cost + target_cost;
            if combined <= 0.0 {
                continue;
            }
            let target_percentage = target_cost / combined * 100.0;
            rows.push(MigrationProgressRow {
                month,
                project: project.name.clone(),
                source_percentage: source_cost / combined * 100.0,
                target_percentage,
                migration_progress: target_percentage,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::record;
    use crate::models::CloudProvider::{Aws, Gcp};
    use crate::models::{CloudAllocation, Lifecycle, MultiCloudProject};
    use crate::pattern::MigrationParams;
    use chrono::Days;

    fn migration_project(name: &str) -> MultiCloudProject {
        let allocation = |pct| CloudAllocation {
            base_lifecycle: Lifecycle::SteadyState,
            services: vec!["EC2".to_string()],
            stages: vec!["prod".to_string()],
            percentage: pct,
        };
        MultiCloudProject {
            name: name.to_string(),
            description: String::new(),
            use_case: String::new(),
            business_unit: String::new(),
            pattern: WorkloadPattern::Migration(MigrationParams {
                source_cloud: Some(Aws),
                target_cloud: Some(Gcp),
                start_ratio: 0.3,
                duration_ratio: 0.4,
            }),
            clouds: [(Aws, allocation(0.8)), (Gcp, allocation(0.2))].into(),
        }
    }

    /// Build a table whose daily costs follow the pattern factors, the way
    /// adjusted generator output would
    fn pattern_shaped_table(project: &MultiCloudProject, total_days: u32) -> ConsolidatedTable {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut table = ConsolidatedTable::new();
        for day in 0..total_days {
            let date = start + Days::new(u64::from(day));
            let date = date.format("%Y-%m-%d").to_string();
            for (&cloud, alloc) in &project.clouds {
                let factor = project.pattern.factor(day, total_days, cloud);
                table.push(record(
                    &project.name,
                    cloud,
                    &date,
                    "EC2",
                    alloc.percentage * 100.0 * factor,
                ));
            }
        }
        table
    }

    #[test]
    fn test_migration_progress_is_monotonic() {
        let project = migration_project("m");
        let table = pattern_shaped_table(&project, 365);
        let rows = generate_migration_analysis(&table, &[project]);
        assert!(rows.len() >= 12);

        let mut previous = 0.0;
        for row in &rows {
            assert!(
                row.migration_progress >= previous - 1e-9,
                "progress regressed in {}: {} < {previous}",
                row.month,
                row.migration_progress
            );
            previous = row.migration_progress;
        }

        // Post-window spend split: source 0.8 * 0.1 vs target 0.2 * 1.0,
        // so progress settles at 20/28
        let final_share = 20.0 / 28.0 * 100.0;
        let last = rows.last().unwrap();
        assert!(
            (last.target_percentage - final_share).abs() < 1e-6,
            "final progress {last:?}"
        );
        assert!((last.source_percentage + last.target_percentage - 100.0).abs() < 1e-9);

        // The window ends on day 255; by that month progress is already
        // within 10% of its settled value
        let window_end_month = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let at_window_end = rows.iter().find(|r| r.month == window_end_month).unwrap();
        assert!(
            at_window_end.migration_progress >= 0.9 * final_share,
            "window-end progress {at_window_end:?}"
        );
    }

    #[test]
    fn test_non_migration_projects_are_excluded() {
        let mut project = migration_project("s");
        project.pattern = WorkloadPattern::SteadyState;
        let table = pattern_shaped_table(&project, 60);
        let rows = generate_migration_analysis(&table, &[project]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_table_yields_no_rows() {
        let project = migration_project("m");
        let rows = generate_migration_analysis(&ConsolidatedTable::new(), &[project]);
        assert!(rows.is_empty());
    }
}
