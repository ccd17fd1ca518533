//! Analytics over the consolidated billing table
//!
//! This module derives the named reports from a [`ConsolidatedTable`]:
//! - per-project cloud cost distribution
//! - month-bucketed time series (by cloud, project/cloud, cloud/service)
//! - migration progress curves for migration projects
//! - cloud vs on-premises cost comparison
//! - rule-based optimization recommendations
//!
//! Every report is a pure function of the table (and, where noted, of the
//! original project configurations).

mod migration;
mod onprem;
mod recommendations;
mod timeseries;

pub use migration::{generate_migration_analysis, MigrationProgressRow};
pub use onprem::{generate_on_prem_comparison, CostComparisonRow, CostType};
pub use recommendations::{
    generate_optimization_recommendations, Recommendation, RecommendationKind,
};
pub use timeseries::{
    generate_time_series_reports, MonthlyCloudCost, MonthlyProjectCloudCost, ServiceDistributionRow,
    TimeSeriesReports,
};

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{CloudProvider, ConsolidatedTable};

/// One cloud's slice of a project's total cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub multi_cloud_project: String,
    pub cloud: CloudProvider,
    pub cost: f64,
    pub total_cost: f64,
    /// Share of the project total, in percent
    pub percentage: f64,
}

/// Cost distribution across clouds, per project
///
/// The percentages of one project's rows sum to 100 whenever the project
/// has any cost at all.
pub fn generate_distribution_report(table: &ConsolidatedTable) -> Vec<DistributionRow> {
    let mut by_project_cloud: BTreeMap<(String, CloudProvider), f64> = BTreeMap::new();
    let mut project_totals: BTreeMap<String, f64> = BTreeMap::new();

    for record in table.iter() {
        *by_project_cloud
            .entry((record.multi_cloud_project.clone(), record.cloud))
            .or_default() += record.cost;
        *project_totals
            .entry(record.multi_cloud_project.clone())
            .or_default() += record.cost;
    }

    by_project_cloud
        .into_iter()
        .map(|((project, cloud), cost)| {
            let total_cost = project_totals.get(&project).copied().unwrap_or(0.0);
            let percentage = if total_cost > 0.0 {
                cost / total_cost * 100.0
            } else {
                0.0
            };
            DistributionRow {
                multi_cloud_project: project,
                cloud,
                cost,
                total_cost,
                percentage,
            }
        })
        .collect()
}

/// Parse a canonical `YYYY-MM-DD` date, skipping empty/malformed values
pub(crate) fn parse_record_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Month-end bucket key for time series alignment
pub(crate) fn month_end(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of the following month always exists
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or(date)
        .pred_opt()
        .unwrap_or(date)
}


#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;
    use crate::models::CloudProvider::{Aws, Gcp};

    #[test]
    fn test_month_end_alignment() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        assert_eq!(month_end(date), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        let december = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(month_end(december), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_distribution_percentages_sum_to_100() {
        let table: ConsolidatedTable = [
            record("p1", Aws, "2026-01-01", "EC2", 700.0),
            record("p1", Gcp, "2026-01-01", "ComputeEngine", 300.0),
            record("p2", Aws, "2026-01-02", "S3", 50.0),
        ]
        .into_iter()
        .collect();

        let report = generate_distribution_report(&table);
        let p1_total: f64 = report
            .iter()
            .filter(|r| r.multi_cloud_project == "p1")
            .map(|r| r.percentage)
            .sum();
        assert!((p1_total - 100.0).abs() < 1e-9);

        let p1_aws = report
            .iter()
            .find(|r| r.multi_cloud_project == "p1" && r.cloud == Aws)
            .unwrap();
        assert!((p1_aws.percentage - 70.0).abs() < 1e-9);

        let p2 = report
            .iter()
            .find(|r| r.multi_cloud_project == "p2")
            .unwrap();
        assert!((p2.percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_report_empty_table() {
        let report = generate_distribution_report(&ConsolidatedTable::new());
        assert!(report.is_empty());
    }
}
