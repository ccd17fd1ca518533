//! Cloud vs on-premises cost comparison
//!
//! Synthesizes an estimated on-premises cost series next to each
//! project's monthly cloud spend. Repatriation projects get a ratio curve
//! that starts at 1.3x cloud cost and falls to 0.7x as the repatriation
//! completes; every other project gets a single uniformly drawn factor in
//! [1.2, 1.4].

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{ConsolidatedTable, MultiCloudProject};
use crate::pattern::WorkloadPattern;

use super::{month_end, parse_record_date};

/// Which side of the comparison a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Cloud,
    OnPrem,
}

impl CostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::Cloud => "cloud",
            CostType::OnPrem => "on_prem",
        }
    }
}

/// One month of cloud or on-prem cost for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComparisonRow {
    pub month: NaiveDate,
    pub project: String,
    pub cost_type: CostType,
    pub cost: f64,
}

/// Build the cloud vs on-prem comparison for every project with data
///
/// `rng` supplies the per-project factor for non-repatriation projects;
/// one draw per project, applied to every month.
pub fn generate_on_prem_comparison(
    table: &ConsolidatedTable,
    projects: &[MultiCloudProject],
    rng: &mut impl Rng,
) -> Vec<CostComparisonRow> {
    let mut rows = Vec::new();

    // Repatriation projects first, then the flat-factor remainder
    for project in projects {
        if let WorkloadPattern::CloudRepatriation(params) = &project.pattern {
            if params.cloud_source.is_none() {
                continue;
            }
            append_repatriation_rows(table, project, params.start_ratio, &mut rows);
        }
    }

    for project in projects {
        if matches!(project.pattern, WorkloadPattern::CloudRepatriation(_)) {
            continue;
        }
        let Some(monthly) = monthly_cloud_costs(table, &project.name) else {
            continue;
        };
        let on_prem_factor = rng.gen_range(1.2..1.4);
        for (&month, &cost) in &monthly {
            rows.push(CostComparisonRow {
                month,
                project: project.name.clone(),
                cost_type: CostType::Cloud,
                cost,
            });
        }
        for (&month, &cost) in &monthly {
            rows.push(CostComparisonRow {
                month,
                project: project.name.clone(),
                cost_type: CostType::OnPrem,
                cost: cost * on_prem_factor,
            });
        }
    }

    rows
}

/// On-prem/cloud cost ratio for a repatriation project at a given date
///
/// 1.3 before the repatriation start, linear down to 0.7 by
/// `start + 0.3 * total_days`, held at 0.7 thereafter.
pub(crate) fn repatriation_ratio(
    date: NaiveDate,
    repatriation_start: NaiveDate,
    total_days: i64,
) -> f64 {
    const PRE_REPATRIATION_RATIO: f64 = 1.3;
    const FINAL_SAVINGS_RATIO: f64 = 0.7;

    if date < repatriation_start {
        return PRE_REPATRIATION_RATIO;
    }
    let ramp_days = total_days as f64 * 0.3;
    let progress = if ramp_days > 0.0 {
        ((date - repatriation_start).num_days() as f64 / ramp_days).min(1.0)
    } else {
        1.0
    };
    PRE_REPATRIATION_RATIO - (PRE_REPATRIATION_RATIO - FINAL_SAVINGS_RATIO) * progress
}

fn append_repatriation_rows(
    table: &ConsolidatedTable,
    project: &MultiCloudProject,
    start_ratio: f64,
    rows: &mut Vec<CostComparisonRow>,
) {
    let Some(monthly) = monthly_cloud_costs(table, &project.name) else {
        return;
    };
    let Some((first_date, last_date)) = project_date_range(table, &project.name) else {
        return;
    };
    let total_days = (last_date - first_date).num_days();
    let start_offset = (total_days as f64 * start_ratio) as u64;
    let repatriation_start = first_date + Days::new(start_offset);

    for (&month, &cost) in &monthly {
        rows.push(CostComparisonRow {
            month,
            project: project.name.clone(),
            cost_type: CostType::Cloud,
            cost,
        });
    }
    for (&month, &cost) in &monthly {
        let ratio = repatriation_ratio(month, repatriation_start, total_days);
        rows.push(CostComparisonRow {
            month,
            project: project.name.clone(),
            cost_type: CostType::OnPrem,
            cost: cost * ratio,
        });
    }
}

fn monthly_cloud_costs(
    table: &ConsolidatedTable,
    project_name: &str,
) -> Option<BTreeMap<NaiveDate, f64>> {
    let mut monthly: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in table.iter() {
        if record.multi_cloud_project != project_name {
            continue;
        }
        let Some(date) = parse_record_date(&record.date) else {
            continue;
        };
        *monthly.entry(month_end(date)).or_default() += record.cost;
    }
    if monthly.is_empty() {
        None
    } else {
        Some(monthly)
    }
}

fn project_date_range(
    table: &ConsolidatedTable,
    project_name: &str,
) -> Option<(NaiveDate, NaiveDate)> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    for record in table.iter() {
        if record.multi_cloud_project != project_name {
            continue;
        }
        let Some(date) = parse_record_date(&record.date) else {
            continue;
        };
        range = Some(match range {
            Some((min, max)) => (min.min(date), max.max(date)),
            None => (date, date),
        });
    }
    range
}
