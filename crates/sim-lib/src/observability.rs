//! Structured logging for simulation runs
//!
//! Event-tagged log records for run lifecycle, per-project progress, and
//! project failures, emitted through `tracing`.

use tracing::{info, warn};

use crate::models::CloudProvider;

/// Structured logger for simulation run events
#[derive(Clone)]
pub struct RunLogger {
    run_label: String,
}

impl RunLogger {
    pub fn new(run_label: impl Into<String>) -> Self {
        Self {
            run_label: run_label.into(),
        }
    }

    /// Log the start of a simulation run
    pub fn log_run_start(&self, project_count: usize, days: u32, annual_budget: f64) {
        info!(
            event = "run_started",
            run = %self.run_label,
            project_count = project_count,
            days = days,
            annual_budget = annual_budget,
            "Starting multi-cloud simulation run"
        );
    }

    /// Log completion of one cloud slice of a project
    pub fn log_generation(&self, project: &str, cloud: CloudProvider, record_count: usize) {
        info!(
            event = "cloud_generated",
            run = %self.run_label,
            project = %project,
            cloud = %cloud,
            record_count = record_count,
            "Generated provider billing records"
        );
    }

    /// Log completion of a whole project
    pub fn log_project_completed(&self, project: &str, cloud_count: usize, record_count: usize) {
        info!(
            event = "project_completed",
            run = %self.run_label,
            project = %project,
            cloud_count = cloud_count,
            record_count = record_count,
            "Project simulation completed"
        );
    }

    /// Log a project that failed and was dropped from the batch
    pub fn log_project_failed(&self, project: &str, error: &str) {
        warn!(
            event = "project_failed",
            run = %self.run_label,
            project = %project,
            error = %error,
            "Project simulation failed; continuing with empty result"
        );
    }

    /// Log the end-of-run summary
    pub fn log_run_summary(&self, projects_completed: usize, consolidated_records: usize) {
        info!(
            event = "run_completed",
            run = %self.run_label,
            projects_completed = projects_completed,
            consolidated_records = consolidated_records,
            "Simulation run completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_creation() {
        let logger = RunLogger::new("test-run");
        assert_eq!(logger.run_label, "test-run");
    }
}
