//! Error types for the simulation pipeline

use thiserror::Error;

use crate::models::CloudProvider;

/// Errors surfaced by the simulation core
#[derive(Debug, Error)]
pub enum SimError {
    /// A provider generator failed for one project slice
    ///
    /// The pipeline catches this at the project boundary; it never aborts
    /// the batch.
    #[error("generator for {cloud} failed on project {project}")]
    Generation {
        project: String,
        cloud: CloudProvider,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid simulation settings: {0}")]
    InvalidSettings(String),
}
