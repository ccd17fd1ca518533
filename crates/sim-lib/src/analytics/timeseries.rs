//! Month-bucketed cost time series

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CloudProvider, ConsolidatedTable};

use super::{month_end, parse_record_date};

/// Monthly spend for one cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCloudCost {
    /// Month-end bucket date
    pub month: NaiveDate,
    pub cloud: CloudProvider,
    pub cost: f64,
}

/// Monthly spend for one (project, cloud) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjectCloudCost {
    pub month: NaiveDate,
    pub multi_cloud_project: String,
    pub cloud: CloudProvider,
    pub cost: f64,
}

/// Total spend for one service on one cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDistributionRow {
    pub cloud: CloudProvider,
    pub service: String,
    pub cost: f64,
}

/// The three time-series views over the consolidated table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeriesReports {
    pub monthly_by_cloud: Vec<MonthlyCloudCost>,
    pub monthly_by_project_cloud: Vec<MonthlyProjectCloudCost>,
    pub service_distribution: Vec<ServiceDistributionRow>,
}

/// Bucket costs by month end, by cloud, by (project, cloud), and sum
/// service costs per cloud
///
/// Records without a parsable date are excluded from the month-bucketed
/// views but still counted in the service distribution.
pub fn generate_time_series_reports(table: &ConsolidatedTable) -> TimeSeriesReports {
    let mut by_cloud: BTreeMap<(NaiveDate, CloudProvider), f64> = BTreeMap::new();
    let mut by_project_cloud: BTreeMap<(NaiveDate, String, CloudProvider), f64> = BTreeMap::new();
    let mut by_service: BTreeMap<(CloudProvider, String), f64> = BTreeMap::new();

    for record in table.iter() {
        *by_service
            .entry((record.cloud, record.service.clone()))
            .or_default() += record.cost;

        let Some(date) = parse_record_date(&record.date) else {
            continue;
        };
        let month = month_end(date);
        *by_cloud.entry((month, record.cloud)).or_default() += record.cost;
        *by_project_cloud
            .entry((month, record.multi_cloud_project.clone(), record.cloud))
            .or_default() += record.cost;
    }

    TimeSeriesReports {
        monthly_by_cloud: by_cloud
            .into_iter()
            .map(|((month, cloud), cost)| MonthlyCloudCost { month, cloud, cost })
            .collect(),
        monthly_by_project_cloud: by_project_cloud
            .into_iter()
            .map(
                |((month, multi_cloud_project, cloud), cost)| MonthlyProjectCloudCost {
                    month,
                    multi_cloud_project,
                    cloud,
                    cost,
                },
            )
            .collect(),
        service_distribution: by_service
            .into_iter()
            .map(|((cloud, service), cost)| ServiceDistributionRow {
                cloud,
                service,
                cost,
            })
            .collect(),
    }
}
