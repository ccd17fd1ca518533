//! Core data models for the multi-cloud billing simulator

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pattern::WorkloadPattern;

/// Cloud platforms covered by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Gcp,
    Azure,
}

impl CloudProvider {
    /// All supported platforms, in processing order
    pub const ALL: [CloudProvider; 3] =
        [CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Azure => "azure",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base lifecycle of a workload on one cloud, consumed by the
/// per-provider generators when shaping daily volume
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    SteadyState,
    Growing,
    Declining,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::SteadyState => "steady_state",
            Lifecycle::Growing => "growing",
            Lifecycle::Declining => "declining",
        }
    }
}

/// Per-cloud slice of a multi-cloud project
///
/// `percentage` is a design-time approximation of steady-state share in
/// [0, 1]. Allocations within a project need not sum to exactly 1; the
/// per-day pattern adjustment renormalizes shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudAllocation {
    #[serde(default)]
    pub base_lifecycle: Lifecycle,
    pub services: Vec<String>,
    pub stages: Vec<String>,
    pub percentage: f64,
}

/// Immutable multi-cloud project configuration, created once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiCloudProject {
    pub name: String,
    pub description: String,
    pub use_case: String,
    pub business_unit: String,
    pub pattern: WorkloadPattern,
    pub clouds: BTreeMap<CloudProvider, CloudAllocation>,
}

impl MultiCloudProject {
    pub fn allocation(&self, cloud: CloudProvider) -> Option<&CloudAllocation> {
        self.clouds.get(&cloud)
    }
}

/// Opaque provider-specific billing record
///
/// Produced by the per-provider generators with their native field names;
/// read-only to the core except for the cost fields rescaled in place by
/// the record adjuster.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Canonical billing record shared across providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub cloud: CloudProvider,
    pub multi_cloud_project: String,
    /// Calendar date as `YYYY-MM-DD`, empty when the source record had none
    pub date: String,
    pub service: String,
    pub resource_id: String,
    pub cost: f64,
    pub account_id: String,
    pub region: String,
    pub usage_quantity: f64,
    pub usage_unit: String,
}

/// Ordered collection of normalized records, the sole analytics input
///
/// Append-only while the pipeline consolidates provider outputs, read-only
/// afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    records: Vec<NormalizedRecord>,
}

impl ConsolidatedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: NormalizedRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<NormalizedRecord> for ConsolidatedTable {
    fn from_iter<I: IntoIterator<Item = NormalizedRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
