//! Multi-cloud billing simulation library
//!
//! This crate provides the core functionality for:
//! - Workload pattern evaluation and distribution across clouds
//! - Per-provider synthetic billing generation
//! - Pattern-based record adjustment
//! - Schema normalization into one consolidated table
//! - Analytics reports and optimization recommendations

pub mod adjuster;
pub mod analytics;
pub mod catalog;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod models;
pub mod observability;
pub mod pattern;
pub mod pipeline;
pub mod schema;
pub mod synthetic;

pub use error::SimError;
pub use models::*;
pub use observability::RunLogger;
pub use pattern::WorkloadPattern;
pub use pipeline::{
    run_simulation, CloudRun, ProjectResults, SimulationOutcome, SimulationReports,
    SimulationSettings,
};
pub use synthetic::SyntheticGenerator;
