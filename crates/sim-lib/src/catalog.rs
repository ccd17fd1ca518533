//! Built-in multi-cloud project catalog
//!
//! A set of sample project configurations covering every workload
//! pattern, used by the CLI when no project file is supplied. Projects
//! can also be loaded from a JSON file carrying the same shape.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{CloudAllocation, CloudProvider, Lifecycle, MultiCloudProject};
use crate::pattern::{
    BurstParams, ConsolidationParams, DrParams, ExpansionParams, MigrationParams,
    RepatriationParams, WorkloadPattern,
};

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn allocation(
    lifecycle: Lifecycle,
    services: &[&str],
    stages: &[&str],
    percentage: f64,
) -> CloudAllocation {
    CloudAllocation {
        base_lifecycle: lifecycle,
        services: names(services),
        stages: names(stages),
        percentage,
    }
}

/// Load project configurations from a JSON file
pub fn load_projects(path: &Path) -> Result<Vec<MultiCloudProject>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading project file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing project file {}", path.display()))
}

/// The built-in sample projects, one or more per pattern
pub fn builtin_projects() -> Vec<MultiCloudProject> {
    vec![
        MultiCloudProject {
            name: "FinancialServicesHybrid".to_string(),
            description: "Core banking systems in AWS with analytical workloads in Azure"
                .to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Finance".to_string(),
            pattern: WorkloadPattern::SteadyState,
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["EC2", "RDS", "Lambda", "DynamoDB", "EBS", "KMS"],
                        &["banking-prod", "banking-staging"],
                        0.7,
                    ),
                ),
                (
                    CloudProvider::Azure,
                    allocation(
                        Lifecycle::SteadyState,
                        &["SynapseAnalytics", "SQLDatabase", "DataFactory", "BlobStorage"],
                        &["analytics-prod"],
                        0.3,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "HealthcareTriCloudAnalytics".to_string(),
            description: "Healthcare analytics platform leveraging services across AWS, GCP, and Azure"
                .to_string(),
            use_case: "Data Processing and ETL".to_string(),
            business_unit: "Healthcare".to_string(),
            pattern: WorkloadPattern::SteadyState,
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["EC2", "RDS", "S3", "Lambda", "Glue", "Athena"],
                        &["pharma-prod", "pharma-research"],
                        0.4,
                    ),
                ),
                (
                    CloudProvider::Gcp,
                    allocation(
                        Lifecycle::SteadyState,
                        &["BigQuery", "VertexAI", "CloudStorage", "Dataflow", "Pub/Sub"],
                        &["ml-prod", "ml-analytics", "ml-featurestore"],
                        0.3,
                    ),
                ),
                (
                    CloudProvider::Azure,
                    allocation(
                        Lifecycle::SteadyState,
                        &["MachineLearning", "SynapseAnalytics", "CognitiveServices", "DataFactory"],
                        &["ml-prod", "ml-staging", "pharma-research"],
                        0.3,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "RetailPlatformMigration".to_string(),
            description: "E-commerce retail platform migrating from AWS to GCP".to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Retail".to_string(),
            pattern: WorkloadPattern::Migration(MigrationParams {
                source_cloud: Some(CloudProvider::Aws),
                target_cloud: Some(CloudProvider::Gcp),
                start_ratio: 0.3,
                duration_ratio: 0.4,
            }),
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::Declining,
                        &["EC2", "RDS", "ElastiCache", "S3", "CloudFront"],
                        &["retail-prod", "retail-staging"],
                        0.8,
                    ),
                ),
                (
                    CloudProvider::Gcp,
                    allocation(
                        Lifecycle::Growing,
                        &["ComputeEngine", "CloudSQL", "Memorystore", "CloudStorage", "CloudCDN"],
                        &["retail-prod", "retail-staging"],
                        0.2,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "CloudExpansionMediaServices".to_string(),
            description: "Media processing platform expanding from AWS to Azure".to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Media".to_string(),
            pattern: WorkloadPattern::Expansion(ExpansionParams {
                new_cloud: Some(CloudProvider::Azure),
                start_ratio: 0.25,
                duration_ratio: 0.4,
            }),
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["EC2", "S3", "MediaConvert", "CloudFront", "Lambda"],
                        &["media-prod", "media-staging"],
                        0.95,
                    ),
                ),
                (
                    CloudProvider::Azure,
                    allocation(
                        Lifecycle::Growing,
                        &["VirtualMachines", "BlobStorage", "MediaServices", "CDN", "Functions"],
                        &["media-prod", "media-staging"],
                        0.05,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "MicroservicesMigration".to_string(),
            description: "Microservices architecture migrating from on-prem to multi-cloud"
                .to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Product".to_string(),
            pattern: WorkloadPattern::Expansion(ExpansionParams {
                new_cloud: Some(CloudProvider::Gcp),
                start_ratio: 0.1,
                duration_ratio: 0.5,
            }),
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["EC2", "Lambda", "DynamoDB", "APIGateway", "S3", "CloudFront", "SQS", "SNS"],
                        &["supplychain-staging", "supplychain-prod"],
                        0.8,
                    ),
                ),
                (
                    CloudProvider::Gcp,
                    allocation(
                        Lifecycle::Growing,
                        &[
                            "CloudRun",
                            "CloudFunctions",
                            "Firestore",
                            "ApiGateway",
                            "CloudStorage",
                            "CloudCDN",
                            "Pub/Sub",
                        ],
                        &["softwaresolutions-prod", "softwaresolutions-staging"],
                        0.2,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "MultiCloudConsolidation".to_string(),
            description: "IT operations consolidating from three clouds to AWS".to_string(),
            use_case: "Management & Governance".to_string(),
            business_unit: "IT".to_string(),
            pattern: WorkloadPattern::Consolidation(ConsolidationParams {
                removed_cloud: Some(CloudProvider::Gcp),
                target_cloud: Some(CloudProvider::Aws),
                start_ratio: 0.4,
                duration_ratio: 0.3,
                workload_ratio: 0.3,
            }),
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::Growing,
                        &["EC2", "RDS", "CloudWatch", "CloudTrail", "GuardDuty"],
                        &["shared-services", "security"],
                        0.5,
                    ),
                ),
                (
                    CloudProvider::Gcp,
                    allocation(
                        Lifecycle::Declining,
                        &["ComputeEngine", "CloudSQL", "CloudMonitoring", "CloudLogging"],
                        &["shared-services", "security"],
                        0.3,
                    ),
                ),
                (
                    CloudProvider::Azure,
                    allocation(
                        Lifecycle::SteadyState,
                        &["VirtualMachines", "SQLDatabase", "Monitor", "LogAnalytics"],
                        &["shared-services", "security"],
                        0.2,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "DisasterRecoverySetup".to_string(),
            description: "Manufacturing systems with Azure primary and AWS DR".to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Manufacturing".to_string(),
            pattern: WorkloadPattern::DrScenario(DrParams {
                primary_cloud: Some(CloudProvider::Azure),
                dr_cloud: Some(CloudProvider::Aws),
                test_frequency_days: 90,
                test_duration_days: 3,
                failover_day: Some(180),
                failover_duration_days: 5,
            }),
            clouds: BTreeMap::from([
                (
                    CloudProvider::Azure,
                    allocation(
                        Lifecycle::SteadyState,
                        &["VirtualMachines", "SQLDatabase", "VPNGateway", "AppService"],
                        &["manufacturing-prod", "manufacturing-staging"],
                        0.9,
                    ),
                ),
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["EC2", "RDS", "VPC", "Lambda", "Kinesis"],
                        &["manufacturing-iot", "manufacturing-prod"],
                        0.1,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "BurstingDevelopmentPlatform".to_string(),
            description: "Development platform with GCP primary and AWS for bursting capacity"
                .to_string(),
            use_case: "Developer Tools".to_string(),
            business_unit: "Engineering".to_string(),
            pattern: WorkloadPattern::BurstScaling(BurstParams {
                primary_cloud: Some(CloudProvider::Gcp),
                burst_cloud: Some(CloudProvider::Aws),
                threshold: 0.8,
                frequency_days: 30,
                duration_days: 5,
                overflow_factor: 0.6,
            }),
            clouds: BTreeMap::from([
                (
                    CloudProvider::Gcp,
                    allocation(
                        Lifecycle::SteadyState,
                        &["ComputeEngine", "CloudBuild", "CloudStorage", "CloudRun", "CloudSQL"],
                        &["dev", "ml-dev"],
                        0.8,
                    ),
                ),
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["EC2", "CodeBuild", "S3", "ECR", "Lambda"],
                        &["sandbox-central", "development"],
                        0.2,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "AIMLMultiCloudOptimization".to_string(),
            description: "AI/ML platform choosing optimal services across clouds".to_string(),
            use_case: "Machine Learning and AI".to_string(),
            business_unit: "Research".to_string(),
            pattern: WorkloadPattern::SteadyState,
            clouds: BTreeMap::from([
                (
                    CloudProvider::Aws,
                    allocation(
                        Lifecycle::SteadyState,
                        &["SageMaker", "SageMakerInference", "S3", "Lambda", "EC2"],
                        &["ml-prod", "ml-staging"],
                        0.4,
                    ),
                ),
                (
                    CloudProvider::Gcp,
                    allocation(
                        Lifecycle::SteadyState,
                        &["VertexAI", "AIProtagonist", "BigQuery", "DataFlow", "CloudStorage"],
                        &["ml-featurestore", "ml-analytics"],
                        0.4,
                    ),
                ),
                (
                    CloudProvider::Azure,
                    allocation(
                        Lifecycle::SteadyState,
                        &["MachineLearning", "OpenAI", "CognitiveServices", "Functions", "SynapseAnalytics"],
                        &["ml-dev", "ml-prod"],
                        0.2,
                    ),
                ),
            ]),
        },
        MultiCloudProject {
            name: "CloudRepatriationProject".to_string(),
            description: "Finance applications moving from cloud back to on-premises".to_string(),
            use_case: "Enterprise Applications".to_string(),
            business_unit: "Finance".to_string(),
            pattern: WorkloadPattern::CloudRepatriation(RepatriationParams {
                cloud_source: Some(CloudProvider::Aws),
                start_ratio: 0.3,
                duration_ratio: 0.4,
            }),
            clouds: BTreeMap::from([(
                CloudProvider::Aws,
                allocation(
                    Lifecycle::Declining,
                    &["EC2", "RDS", "EBS", "EFS", "S3", "CloudWatch"],
                    &["finance-prod", "finance-staging"],
                    1.0,
                ),
            )]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_catalog_covers_every_pattern() {
        let kinds: BTreeSet<&str> = builtin_projects()
            .iter()
            .map(|p| p.pattern.kind())
            .collect();
        for kind in [
            "steady_state",
            "migration",
            "expansion",
            "consolidation",
            "dr_scenario",
            "burst_scaling",
            "cloud_repatriation",
        ] {
            assert!(kinds.contains(kind), "missing pattern {kind}");
        }
    }

    #[test]
    fn test_catalog_allocations_are_valid() {
        for project in builtin_projects() {
            assert!(!project.clouds.is_empty(), "{} has no clouds", project.name);
            for (cloud, alloc) in &project.clouds {
                assert!(
                    (0.0..=1.0).contains(&alloc.percentage),
                    "{}/{cloud} percentage out of range",
                    project.name
                );
                assert!(!alloc.services.is_empty());
                assert!(!alloc.stages.is_empty());
            }
        }
    }

    #[test]
    fn test_catalog_breadth() {
        let projects = builtin_projects();
        assert_eq!(projects.len(), 10);
        for name in [
            "HealthcareTriCloudAnalytics",
            "AIMLMultiCloudOptimization",
            "MicroservicesMigration",
        ] {
            assert!(projects.iter().any(|p| p.name == name), "missing {name}");
        }

        let tri_cloud = projects
            .iter()
            .find(|p| p.name == "HealthcareTriCloudAnalytics")
            .unwrap();
        assert_eq!(tri_cloud.clouds.len(), 3);
    }

    #[test]
    fn test_catalog_round_trips_through_json() {
        let projects = builtin_projects();
        let json = serde_json::to_string(&projects).unwrap();
        let parsed: Vec<MultiCloudProject> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), projects.len());

        let migration = parsed
            .iter()
            .zip(&projects)
            .find(|(p, _)| p.name == "RetailPlatformMigration")
            .unwrap();
        assert_eq!(migration.0.pattern, migration.1.pattern);
    }
}
