//! Configuration for the simulator CLI
//!
//! Run parameters come from `MCSIM_*` environment variables with serde
//! defaults; command-line flags override individual fields afterward.

use anyhow::Result;
use mcsim_lib::SimulationSettings;
use serde::Deserialize;

/// Simulation parameters loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Number of days to simulate
    #[serde(default = "default_days")]
    pub days_to_generate: u32,

    /// Total annual budget across all platforms, in USD
    #[serde(default = "default_annual_budget")]
    pub annual_budget: f64,

    /// Upper bound on the number of projects processed in one run
    #[serde(default = "default_max_projects")]
    pub max_projects: usize,

    /// Whether to produce the cloud vs on-premises comparison
    #[serde(default = "default_on_prem")]
    pub on_prem_cost_simulation: bool,

    /// Relative cost jitter applied by the synthetic generators
    #[serde(default = "default_volatility")]
    pub volatility_factor: f64,

    /// Seed for volatility and on-premises cost estimation
    #[serde(default)]
    pub seed: u64,
}

fn default_days() -> u32 {
    365
}

fn default_annual_budget() -> f64 {
    150_000_000.0
}

fn default_max_projects() -> usize {
    16
}

fn default_on_prem() -> bool {
    true
}

fn default_volatility() -> f64 {
    0.02
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days_to_generate: default_days(),
            annual_budget: default_annual_budget(),
            max_projects: default_max_projects(),
            on_prem_cost_simulation: default_on_prem(),
            volatility_factor: default_volatility(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Load configuration from `MCSIM_*` environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("MCSIM"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    /// Convert into pipeline settings; the start date is filled in by the
    /// caller
    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            days_to_generate: self.days_to_generate,
            annual_budget: self.annual_budget,
            max_projects: self.max_projects,
            on_prem_cost_simulation: self.on_prem_cost_simulation,
            volatility_factor: self.volatility_factor,
            seed: self.seed,
            ..SimulationSettings::default()
        }
    }
}
