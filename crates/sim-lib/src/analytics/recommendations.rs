//! Rule-based cost optimization recommendations
//!
//! Scans project/cloud cost shares and per-service spend for optimization
//! opportunities: consolidating marginal clouds, evaluating full
//! migrations, reserving high-spend compute capacity, and tiering
//! storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CloudProvider, ConsolidatedTable, MultiCloudProject};
use crate::pattern::WorkloadPattern;

/// Minimum service spend before a reservation purchase is suggested
const RESERVATION_COST_THRESHOLD: f64 = 10_000.0;

/// Minimum storage spend before a tiering review is suggested
const STORAGE_COST_THRESHOLD: f64 = 5_000.0;

/// Share below which a cloud is a consolidation candidate, in percent
const CONSOLIDATION_SHARE_PERCENT: f64 = 10.0;

/// Share above which a cloud is a migration-evaluation candidate
const MIGRATION_SHARE_PERCENT: f64 = 80.0;

/// Compute services that typically benefit from reserved capacity
fn compute_services(cloud: CloudProvider) -> &'static [&'static str] {
    match cloud {
        CloudProvider::Aws => &["EC2", "RDS", "ElastiCache", "Redshift"],
        CloudProvider::Azure => &["VirtualMachines", "SQLDatabase", "AKS"],
        CloudProvider::Gcp => &["ComputeEngine", "CloudSQL", "GKE"],
    }
}

/// Storage services worth a tiering review at sustained spend
fn storage_services(cloud: CloudProvider) -> &'static [&'static str] {
    match cloud {
        CloudProvider::Aws => &["S3", "EBS", "EFS", "Glacier"],
        CloudProvider::Azure => &["BlobStorage", "ManagedDisks", "Files"],
        CloudProvider::Gcp => &["CloudStorage", "PersistentDisk", "Filestore"],
    }
}

/// Category of an optimization finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Consolidation,
    EvaluateMigration,
    Reservation,
    StorageTiering,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Consolidation => "consolidation",
            RecommendationKind::EvaluateMigration => "evaluate_migration",
            RecommendationKind::Reservation => "reservation",
            RecommendationKind::StorageTiering => "storage_tiering",
        }
    }
}

/// One optimization finding with an estimated annual saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub project: String,
    pub kind: RecommendationKind,
    pub cloud: CloudProvider,
    pub service: Option<String>,
    pub description: String,
    pub estimated_savings: f64,
}

/// Derive optimization recommendations from consolidated costs
pub fn generate_optimization_recommendations(
    table: &ConsolidatedTable,
    projects: &[MultiCloudProject],
) -> Vec<Recommendation> {
    let patterns: BTreeMap<&str, &WorkloadPattern> = projects
        .iter()
        .map(|p| (p.name.as_str(), &p.pattern))
        .collect();

    let mut cloud_costs: BTreeMap<(String, CloudProvider), f64> = BTreeMap::new();
    let mut service_costs: BTreeMap<(String, CloudProvider, String), f64> = BTreeMap::new();
    for record in table.iter() {
        *cloud_costs
            .entry((record.multi_cloud_project.clone(), record.cloud))
            .or_default() += record.cost;
        *service_costs
            .entry((
                record.multi_cloud_project.clone(),
                record.cloud,
                record.service.clone(),
            ))
            .or_default() += record.cost;
    }

    let mut project_totals: BTreeMap<&str, f64> = BTreeMap::new();
    let mut project_cloud_count: BTreeMap<&str, usize> = BTreeMap::new();
    for ((project, _), cost) in &cloud_costs {
        *project_totals.entry(project).or_default() += cost;
        *project_cloud_count.entry(project).or_default() += 1;
    }

    let mut recommendations = Vec::new();

    // Cost-imbalance rules apply only to genuinely multi-cloud projects
    for ((project, cloud), &cost) in &cloud_costs {
        let total = project_totals.get(project.as_str()).copied().unwrap_or(0.0);
        let cloud_count = project_cloud_count
            .get(project.as_str())
            .copied()
            .unwrap_or(0);
        if cloud_count < 2 || total <= 0.0 {
            continue;
        }
        let percentage = cost / total * 100.0;

        if percentage < CONSOLIDATION_SHARE_PERCENT && cost > 0.0 {
            recommendations.push(Recommendation {
                project: project.clone(),
                kind: RecommendationKind::Consolidation,
                cloud: *cloud,
                service: None,
                description: format!(
                    "Consider consolidating {cloud} workloads (only {percentage:.1}% of \
                     project costs) to reduce multi-cloud overhead."
                ),
                estimated_savings: cost * 0.3,
            });
        } else if percentage > MIGRATION_SHARE_PERCENT {
            let is_migration = matches!(
                patterns.get(project.as_str()),
                Some(WorkloadPattern::Migration(_))
            );
            if !is_migration {
                recommendations.push(Recommendation {
                    project: project.clone(),
                    kind: RecommendationKind::EvaluateMigration,
                    cloud: *cloud,
                    service: None,
                    description: format!(
                        "Consider evaluating full migration to {cloud} (already \
                         {percentage:.1}% of project costs)."
                    ),
                    estimated_savings: (total - cost) * 0.2,
                });
            }
        }
    }

    // Reservation opportunities for sustained compute spend
    for ((project, cloud, service), &cost) in &service_costs {
        if compute_services(*cloud).contains(&service.as_str()) && cost > RESERVATION_COST_THRESHOLD
        {
            recommendations.push(Recommendation {
                project: project.clone(),
                kind: RecommendationKind::Reservation,
                cloud: *cloud,
                service: Some(service.clone()),
                description: format!(
                    "Consider purchasing reserved instances/commitments for {service} on {cloud}."
                ),
                estimated_savings: cost * 0.3,
            });
        }
    }

    // Storage tiering reviews
    for ((project, cloud, service), &cost) in &service_costs {
        if storage_services(*cloud).contains(&service.as_str()) && cost > STORAGE_COST_THRESHOLD {
            recommendations.push(Recommendation {
                project: project.clone(),
                kind: RecommendationKind::StorageTiering,
                cloud: *cloud,
                service: Some(service.clone()),
                description: format!(
                    "Review {service} usage patterns for potential tiering optimizations."
                ),
                estimated_savings: cost * 0.15,
            });
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::record;
    use crate::models::CloudProvider::{Aws, Azure, Gcp};
    use crate::models::{CloudAllocation, Lifecycle};
    use crate::pattern::MigrationParams;

    fn project(name: &str, pattern: WorkloadPattern) -> MultiCloudProject {
        let allocation = || CloudAllocation {
            base_lifecycle: Lifecycle::SteadyState,
            services: vec![],
            stages: vec![],
            percentage: 0.5,
        };
        MultiCloudProject {
            name: name.to_string(),
            description: String::new(),
            use_case: String::new(),
            business_unit: String::new(),
            pattern,
            clouds: [(Aws, allocation()), (Gcp, allocation())].into(),
        }
    }

    #[test]
    fn test_marginal_cloud_flagged_for_consolidation() {
        let table: ConsolidatedTable = [
            record("p", Aws, "2026-01-01", "Lambda", 9_500.0),
            record("p", Gcp, "2026-01-01", "Pub/Sub", 500.0),
        ]
        .into_iter()
        .collect();
        let projects = [project("p", WorkloadPattern::SteadyState)];

        let recs = generate_optimization_recommendations(&table, &projects);
        let consolidation = recs
            .iter()
            .find(|r| r.kind == RecommendationKind::Consolidation)
            .unwrap();
        assert_eq!(consolidation.cloud, Gcp);
        assert!((consolidation.estimated_savings - 150.0).abs() < 1e-9);

        // The 95% cloud is simultaneously a migration-evaluation candidate
        let migration = recs
            .iter()
            .find(|r| r.kind == RecommendationKind::EvaluateMigration)
            .unwrap();
        assert_eq!(migration.cloud, Aws);
        assert!((migration.estimated_savings - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_migration_projects_not_flagged_for_migration() {
        let table: ConsolidatedTable = [
            record("p", Aws, "2026-01-01", "Lambda", 9_000.0),
            record("p", Gcp, "2026-01-01", "Pub/Sub", 1_000.0),
        ]
        .into_iter()
        .collect();
        let projects = [project(
            "p",
            WorkloadPattern::Migration(MigrationParams {
                source_cloud: Some(Aws),
                target_cloud: Some(Gcp),
                start_ratio: 0.3,
                duration_ratio: 0.3,
            }),
        )];

        let recs = generate_optimization_recommendations(&table, &projects);
        assert!(recs
            .iter()
            .all(|r| r.kind != RecommendationKind::EvaluateMigration));
    }

    #[test]
    fn test_single_cloud_projects_skip_imbalance_rules() {
        let table: ConsolidatedTable =
            [record("p", Aws, "2026-01-01", "Lambda", 50_000.0)].into_iter().collect();
        let projects = [project("p", WorkloadPattern::SteadyState)];

        let recs = generate_optimization_recommendations(&table, &projects);
        assert!(recs
            .iter()
            .all(|r| r.kind != RecommendationKind::EvaluateMigration
                && r.kind != RecommendationKind::Consolidation));
    }

    #[test]
    fn test_reservation_and_tiering_thresholds() {
        let table: ConsolidatedTable = [
            record("p", Aws, "2026-01-01", "EC2", 12_000.0),
            record("p", Aws, "2026-01-01", "S3", 6_000.0),
            record("p", Azure, "2026-01-01", "VirtualMachines", 8_000.0),
            record("p", Gcp, "2026-01-01", "CloudStorage", 4_000.0),
        ]
        .into_iter()
        .collect();
        let projects = [project("p", WorkloadPattern::SteadyState)];

        let recs = generate_optimization_recommendations(&table, &projects);

        let reservations: Vec<_> = recs
            .iter()
            .filter(|r| r.kind == RecommendationKind::Reservation)
            .collect();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].service.as_deref(), Some("EC2"));
        assert!((reservations[0].estimated_savings - 3_600.0).abs() < 1e-9);

        let tiering: Vec<_> = recs
            .iter()
            .filter(|r| r.kind == RecommendationKind::StorageTiering)
            .collect();
        assert_eq!(tiering.len(), 1);
        assert_eq!(tiering[0].service.as_deref(), Some("S3"));
        assert!((tiering[0].estimated_savings - 900.0).abs() < 1e-9);
    }
}
