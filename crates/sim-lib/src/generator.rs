//! Per-provider generator contract
//!
//! The provider-specific billing synthesizers are external collaborators:
//! the core only depends on this trait. A generator is invoked once per
//! (project, cloud) with a daily budget derived from the cloud's static
//! percentage; the record adjuster later reshapes its dated output into
//! the pattern's day-varying curve.

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::{CloudAllocation, CloudProvider, Lifecycle, MultiCloudProject, RawRecord};

/// Project slice handed to a provider generator
#[derive(Debug, Clone)]
pub struct GeneratorRequest {
    pub description: String,
    pub use_case: String,
    pub lifecycle: Lifecycle,
    pub services: Vec<String>,
    pub stages: Vec<String>,
    pub business_unit: String,
    /// Name of the owning multi-cloud project
    pub multi_cloud_project: String,
    /// Static share of the project on this cloud, in [0, 1]
    pub cloud_percentage: f64,
}

impl GeneratorRequest {
    /// Build the request for one cloud of a project
    pub fn for_cloud(project: &MultiCloudProject, allocation: &CloudAllocation) -> Self {
        Self {
            description: project.description.clone(),
            use_case: project.use_case.clone(),
            lifecycle: allocation.base_lifecycle,
            services: allocation.services.clone(),
            stages: allocation.stages.clone(),
            business_unit: project.business_unit.clone(),
            multi_cloud_project: project.name.clone(),
            cloud_percentage: allocation.percentage,
        }
    }
}

/// Billing and tag records produced by one generator invocation
#[derive(Debug, Clone, Default)]
pub struct GeneratorOutput {
    pub billing: Vec<RawRecord>,
    pub tags: Vec<RawRecord>,
}

/// A provider-specific billing record synthesizer
pub trait UsageGenerator: Send + Sync {
    /// The cloud platform this generator produces records for
    fn provider(&self) -> CloudProvider;

    /// Generate billing and tag records for one project slice
    ///
    /// Records must carry the provider's native date and cost field names
    /// so the record adjuster and schema normalizer can consume them.
    fn generate(
        &self,
        project_name: &str,
        request: &GeneratorRequest,
        day_count: u32,
        start_date: NaiveDate,
        daily_budget: f64,
    ) -> Result<GeneratorOutput>;
}
