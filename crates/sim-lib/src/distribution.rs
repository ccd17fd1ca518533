//! Per-day cloud share computation
//!
//! Combines each cloud's static base percentage with the pattern
//! adjustment factor for a given day and renormalizes so the shares of a
//! project sum to 1.0.

use std::collections::BTreeMap;

use crate::models::{CloudProvider, MultiCloudProject};

/// Compute the per-cloud workload shares of a project for one day
///
/// Each configured cloud's weight is its base percentage multiplied by the
/// project pattern's adjustment factor for that day. When the total weight
/// is positive the weights are normalized to sum to 1.0; a total of zero
/// leaves the (zero) weights untouched rather than dividing by zero.
pub fn distribute(
    project: &MultiCloudProject,
    day_index: u32,
    total_days: u32,
) -> BTreeMap<CloudProvider, f64> {
    let mut shares: BTreeMap<CloudProvider, f64> = project
        .clouds
        .iter()
        .map(|(&cloud, allocation)| {
            let factor = project.pattern.factor(day_index, total_days, cloud);
            (cloud, allocation.percentage * factor)
        })
        .collect();

    let total: f64 = shares.values().sum();
    if total > 0.0 {
        for weight in shares.values_mut() {
            *weight /= total;
        }
    }

    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CloudAllocation, Lifecycle};
    use crate::pattern::{MigrationParams, WorkloadPattern};
    use crate::models::CloudProvider::{Aws, Gcp};

    fn allocation(percentage: f64) -> CloudAllocation {
        CloudAllocation {
            base_lifecycle: Lifecycle::SteadyState,
            services: vec!["EC2".to_string()],
            stages: vec!["prod".to_string()],
            percentage,
        }
    }

    fn migration_project() -> MultiCloudProject {
        MultiCloudProject {
            name: "RetailPlatformMigration".to_string(),
            description: "E-commerce platform migrating from AWS to GCP".to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Retail".to_string(),
            pattern: WorkloadPattern::Migration(MigrationParams {
                source_cloud: Some(Aws),
                target_cloud: Some(Gcp),
                start_ratio: 0.3,
                duration_ratio: 0.4,
            }),
            clouds: [(Aws, allocation(0.8)), (Gcp, allocation(0.2))].into(),
        }
    }

    #[test]
    fn test_shares_sum_to_one_every_day() {
        let project = migration_project();
        for day in 0..365 {
            let shares = distribute(&project, day, 365);
            let total: f64 = shares.values().sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "shares summed to {total} on day {day}"
            );
        }
    }

    #[test]
    fn test_migration_shifts_share_toward_target() {
        let project = migration_project();
        let before = distribute(&project, 0, 100);
        let after = distribute(&project, 99, 100);
        assert!(before[&Aws] > 0.9);
        assert!(after[&Gcp] > 0.7);
        assert!(after[&Aws] < before[&Aws]);
    }

    #[test]
    fn test_zero_total_weight_is_left_unnormalized() {
        let mut project = migration_project();
        for alloc in project.clouds.values_mut() {
            alloc.percentage = 0.0;
        }
        let shares = distribute(&project, 10, 100);
        assert!(shares.values().all(|&w| w == 0.0));
    }
}
