//! Temporal workload patterns
//!
//! Each multi-cloud project carries one pattern describing how its
//! cross-cloud allocation evolves over the simulated timeline. A pattern
//! maps `(day_index, total_days, cloud)` to a non-negative adjustment
//! factor that scales the cloud's base percentage for that day.
//!
//! Evaluation is total: missing parameters fall back to documented
//! defaults at deserialization time, unknown pattern tags collapse to
//! [`WorkloadPattern::SteadyState`], and degenerate windows (zero
//! duration) behave as an instantaneous transition at the start day.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::models::CloudProvider;

/// Named temporal shape governing a project's cross-cloud allocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum WorkloadPattern {
    SteadyState,
    Migration(MigrationParams),
    Expansion(ExpansionParams),
    Consolidation(ConsolidationParams),
    DrScenario(DrParams),
    BurstScaling(BurstParams),
    CloudRepatriation(RepatriationParams),
}

impl WorkloadPattern {
    /// Adjustment factor for one cloud on one simulated day
    ///
    /// Always returns a value >= 0 and never fails.
    pub fn factor(&self, day_index: u32, total_days: u32, cloud: CloudProvider) -> f64 {
        match self {
            WorkloadPattern::SteadyState => 1.0,
            WorkloadPattern::Migration(p) => p.factor(day_index, total_days, cloud),
            WorkloadPattern::Expansion(p) => p.factor(day_index, total_days, cloud),
            WorkloadPattern::Consolidation(p) => p.factor(day_index, total_days, cloud),
            WorkloadPattern::DrScenario(p) => p.factor(day_index, cloud),
            WorkloadPattern::BurstScaling(p) => p.factor(day_index, cloud),
            WorkloadPattern::CloudRepatriation(p) => p.factor(day_index, total_days, cloud),
        }
    }

    /// Stable tag name, used in reports and logs
    pub fn kind(&self) -> &'static str {
        match self {
            WorkloadPattern::SteadyState => "steady_state",
            WorkloadPattern::Migration(_) => "migration",
            WorkloadPattern::Expansion(_) => "expansion",
            WorkloadPattern::Consolidation(_) => "consolidation",
            WorkloadPattern::DrScenario(_) => "dr_scenario",
            WorkloadPattern::BurstScaling(_) => "burst_scaling",
            WorkloadPattern::CloudRepatriation(_) => "cloud_repatriation",
        }
    }
}

impl<'de> Deserialize<'de> for WorkloadPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            params: serde_json::Value,
        }

        let tagged = Tagged::deserialize(deserializer)?;
        let params = match tagged.params {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        fn parse<'de, T, D>(params: serde_json::Value) -> Result<T, D::Error>
        where
            T: serde::de::DeserializeOwned,
            D: Deserializer<'de>,
        {
            serde_json::from_value(params).map_err(de::Error::custom)
        }

        Ok(match tagged.kind.as_str() {
            "steady_state" => WorkloadPattern::SteadyState,
            "migration" => WorkloadPattern::Migration(parse::<_, D>(params)?),
            "expansion" => WorkloadPattern::Expansion(parse::<_, D>(params)?),
            "consolidation" => WorkloadPattern::Consolidation(parse::<_, D>(params)?),
            "dr_scenario" => WorkloadPattern::DrScenario(parse::<_, D>(params)?),
            "burst_scaling" => WorkloadPattern::BurstScaling(parse::<_, D>(params)?),
            "cloud_repatriation" => WorkloadPattern::CloudRepatriation(parse::<_, D>(params)?),
            // Unknown pattern tags are a no-op
            _ => WorkloadPattern::SteadyState,
        })
    }
}

/// Position of a day relative to a ratio-derived transition window
#[derive(Debug, Clone, Copy, PartialEq)]
enum WindowPhase {
    Before,
    /// Inside the window, with progress in [0, 1]
    During(f64),
    After,
}

/// Resolve a day index against a window defined by timeline ratios
///
/// Start and end days are derived via `floor(total_days * ratio)` and the
/// window is inclusive on both ends. A non-positive duration is an
/// instantaneous transition at the start day.
fn window_phase(day_index: u32, total_days: u32, start_ratio: f64, duration_ratio: f64) -> WindowPhase {
    let start = (total_days as f64 * start_ratio).floor() as i64;
    let duration = (total_days as f64 * duration_ratio).floor() as i64;
    let day = i64::from(day_index);

    if day < start {
        WindowPhase::Before
    } else if duration <= 0 {
        WindowPhase::After
    } else if day <= start + duration {
        WindowPhase::During((day - start) as f64 / duration as f64)
    } else {
        WindowPhase::After
    }
}

fn default_start_ratio() -> f64 {
    0.3
}

fn default_duration_ratio() -> f64 {
    0.3
}

/// Gradual transition of workloads from one cloud to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationParams {
    #[serde(default)]
    pub source_cloud: Option<CloudProvider>,
    #[serde(default)]
    pub target_cloud: Option<CloudProvider>,
    #[serde(default = "default_start_ratio")]
    pub start_ratio: f64,
    #[serde(default = "default_duration_ratio")]
    pub duration_ratio: f64,
}

impl MigrationParams {
    fn factor(&self, day_index: u32, total_days: u32, cloud: CloudProvider) -> f64 {
        let is_source = self.source_cloud == Some(cloud);
        let is_target = self.target_cloud == Some(cloud);

        match window_phase(day_index, total_days, self.start_ratio, self.duration_ratio) {
            WindowPhase::Before if is_target => 0.1,
            WindowPhase::Before => 1.0,
            WindowPhase::During(progress) if is_source => 1.0 - progress * 0.9,
            WindowPhase::During(progress) if is_target => 0.1 + progress * 0.9,
            WindowPhase::During(_) => 1.0,
            WindowPhase::After if is_source => 0.1,
            WindowPhase::After => 1.0,
        }
    }
}

/// Adding a new cloud platform over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionParams {
    #[serde(default)]
    pub new_cloud: Option<CloudProvider>,
    #[serde(default = "default_start_ratio")]
    pub start_ratio: f64,
    #[serde(default = "default_duration_ratio")]
    pub duration_ratio: f64,
}

impl ExpansionParams {
    fn factor(&self, day_index: u32, total_days: u32, cloud: CloudProvider) -> f64 {
        if self.new_cloud != Some(cloud) {
            return 1.0;
        }
        match window_phase(day_index, total_days, self.start_ratio, self.duration_ratio) {
            WindowPhase::Before => 0.1,
            WindowPhase::During(progress) => 0.1 + progress * 0.9,
            WindowPhase::After => 1.0,
        }
    }
}

fn default_workload_ratio() -> f64 {
    0.5
}

/// Winding one cloud down while its workloads move to a target cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationParams {
    #[serde(default)]
    pub removed_cloud: Option<CloudProvider>,
    #[serde(default)]
    pub target_cloud: Option<CloudProvider>,
    #[serde(default = "default_start_ratio")]
    pub start_ratio: f64,
    #[serde(default = "default_duration_ratio")]
    pub duration_ratio: f64,
    /// Relative size of the workload being transferred to the target
    #[serde(default = "default_workload_ratio")]
    pub workload_ratio: f64,
}

impl ConsolidationParams {
    fn factor(&self, day_index: u32, total_days: u32, cloud: CloudProvider) -> f64 {
        let phase = window_phase(day_index, total_days, self.start_ratio, self.duration_ratio);

        if self.removed_cloud == Some(cloud) {
            match phase {
                WindowPhase::Before => 1.0,
                WindowPhase::During(progress) => 1.0 - progress * 0.9,
                WindowPhase::After => 0.1,
            }
        } else if self.target_cloud == Some(cloud) {
            match phase {
                WindowPhase::Before => 1.0,
                WindowPhase::During(progress) => 1.0 + progress * self.workload_ratio,
                WindowPhase::After => 1.0 + self.workload_ratio,
            }
        } else {
            1.0
        }
    }
}

fn default_test_frequency_days() -> u32 {
    90
}

fn default_test_duration_days() -> u32 {
    3
}

fn default_failover_duration_days() -> u32 {
    7
}

/// Primary/DR cloud pair with periodic DR tests and an optional failover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrParams {
    #[serde(default)]
    pub primary_cloud: Option<CloudProvider>,
    #[serde(default)]
    pub dr_cloud: Option<CloudProvider>,
    #[serde(default = "default_test_frequency_days")]
    pub test_frequency_days: u32,
    #[serde(default = "default_test_duration_days")]
    pub test_duration_days: u32,
    /// One-off failover event; no failover is simulated when unset
    #[serde(default)]
    pub failover_day: Option<u32>,
    #[serde(default = "default_failover_duration_days")]
    pub failover_duration_days: u32,
}

impl DrParams {
    fn is_test_day(&self, day_index: u32) -> bool {
        self.test_frequency_days > 0 && day_index % self.test_frequency_days < self.test_duration_days
    }

    fn is_failover(&self, day_index: u32) -> bool {
        match self.failover_day {
            Some(start) => day_index >= start && day_index < start + self.failover_duration_days,
            None => false,
        }
    }

    fn factor(&self, day_index: u32, cloud: CloudProvider) -> f64 {
        let failover = self.is_failover(day_index);

        if self.primary_cloud == Some(cloud) {
            if failover {
                0.1
            } else {
                1.0
            }
        } else if self.dr_cloud == Some(cloud) {
            if failover {
                2.0
            } else if self.is_test_day(day_index) {
                0.5
            } else {
                0.1
            }
        } else {
            1.0
        }
    }
}

fn default_burst_threshold() -> f64 {
    0.8
}

fn default_burst_frequency_days() -> u32 {
    30
}

fn default_burst_duration_days() -> u32 {
    5
}

fn default_overflow_factor() -> f64 {
    0.6
}

/// Secondary cloud absorbing periodic overflow capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstParams {
    #[serde(default)]
    pub primary_cloud: Option<CloudProvider>,
    #[serde(default)]
    pub burst_cloud: Option<CloudProvider>,
    /// Capacity level the primary cloud runs at during a burst
    #[serde(default = "default_burst_threshold")]
    pub threshold: f64,
    #[serde(default = "default_burst_frequency_days")]
    pub frequency_days: u32,
    #[serde(default = "default_burst_duration_days")]
    pub duration_days: u32,
    /// Share of the overflow handled by the burst cloud
    #[serde(default = "default_overflow_factor")]
    pub overflow_factor: f64,
}

impl BurstParams {
    fn is_burst_period(&self, day_index: u32) -> bool {
        self.frequency_days > 0 && day_index % self.frequency_days < self.duration_days
    }

    fn factor(&self, day_index: u32, cloud: CloudProvider) -> f64 {
        let bursting = self.is_burst_period(day_index);

        if self.primary_cloud == Some(cloud) {
            if bursting {
                self.threshold
            } else {
                0.7
            }
        } else if self.burst_cloud == Some(cloud) {
            if bursting {
                self.overflow_factor
            } else {
                0.1
            }
        } else {
            1.0
        }
    }
}

fn default_repatriation_duration_ratio() -> f64 {
    0.4
}

/// Workloads moving back from public cloud to on-premises
///
/// 30% of the footprint remains in the cloud long-term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepatriationParams {
    #[serde(default)]
    pub cloud_source: Option<CloudProvider>,
    #[serde(default = "default_start_ratio")]
    pub start_ratio: f64,
    #[serde(default = "default_repatriation_duration_ratio")]
    pub duration_ratio: f64,
}

impl RepatriationParams {
    fn factor(&self, day_index: u32, total_days: u32, cloud: CloudProvider) -> f64 {
        if self.cloud_source != Some(cloud) {
            return 1.0;
        }
        match window_phase(day_index, total_days, self.start_ratio, self.duration_ratio) {
            WindowPhase::Before => 1.0,
            WindowPhase::During(progress) => 1.0 - progress * 0.7,
            WindowPhase::After => 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CloudProvider::{Aws, Azure, Gcp};

    fn migration() -> WorkloadPattern {
        WorkloadPattern::Migration(MigrationParams {
            source_cloud: Some(Aws),
            target_cloud: Some(Gcp),
            start_ratio: 0.3,
            duration_ratio: 0.4,
        })
    }

    #[test]
    fn test_steady_state_is_identity() {
        let pattern = WorkloadPattern::SteadyState;
        for day in [0, 50, 364] {
            for cloud in CloudProvider::ALL {
                assert_eq!(pattern.factor(day, 365, cloud), 1.0);
            }
        }
    }

    #[test]
    fn test_migration_midpoint() {
        // Window is days 30-70 of 100; day 50 sits at progress 0.5
        let pattern = migration();
        assert!((pattern.factor(50, 100, Aws) - 0.55).abs() < 1e-12);
        assert!((pattern.factor(50, 100, Gcp) - 0.55).abs() < 1e-12);
        assert_eq!(pattern.factor(50, 100, Azure), 1.0);
    }

    #[test]
    fn test_migration_before_and_after_window() {
        let pattern = migration();
        assert_eq!(pattern.factor(0, 100, Aws), 1.0);
        assert!((pattern.factor(0, 100, Gcp) - 0.1).abs() < 1e-12);
        assert!((pattern.factor(99, 100, Aws) - 0.1).abs() < 1e-12);
        assert_eq!(pattern.factor(99, 100, Gcp), 1.0);
    }

    #[test]
    fn test_migration_window_is_inclusive() {
        let pattern = migration();
        // Day 70 is the last in-window day: progress 1.0
        assert!((pattern.factor(70, 100, Aws) - 0.1).abs() < 1e-12);
        assert!((pattern.factor(70, 100, Gcp) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_migration_target_factor_non_decreasing() {
        let pattern = migration();
        let mut previous = 0.0;
        for day in 0..100 {
            let factor = pattern.factor(day, 100, Gcp);
            assert!(
                factor >= previous - 1e-12,
                "target factor regressed at day {day}: {factor} < {previous}"
            );
            previous = factor;
        }
        assert!((previous - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_expansion_ramps_new_cloud_only() {
        let pattern = WorkloadPattern::Expansion(ExpansionParams {
            new_cloud: Some(Azure),
            start_ratio: 0.25,
            duration_ratio: 0.4,
        });
        assert!((pattern.factor(0, 100, Azure) - 0.1).abs() < 1e-12);
        assert!((pattern.factor(45, 100, Azure) - 0.55).abs() < 1e-12);
        assert_eq!(pattern.factor(90, 100, Azure), 1.0);
        for day in [0, 45, 90] {
            assert_eq!(pattern.factor(day, 100, Aws), 1.0);
        }
    }

    #[test]
    fn test_consolidation_end_factor_is_one_plus_workload_ratio() {
        let pattern = WorkloadPattern::Consolidation(ConsolidationParams {
            removed_cloud: Some(Gcp),
            target_cloud: Some(Aws),
            start_ratio: 0.4,
            duration_ratio: 0.3,
            workload_ratio: 0.3,
        });
        // Window is days 40-70 of 100
        assert_eq!(pattern.factor(70, 100, Aws), 1.0 + 0.3);
        assert_eq!(pattern.factor(99, 100, Aws), 1.0 + 0.3);
        assert!((pattern.factor(99, 100, Gcp) - 0.1).abs() < 1e-12);
        assert_eq!(pattern.factor(99, 100, Azure), 1.0);
    }

    #[test]
    fn test_dr_test_day_arithmetic() {
        let params = DrParams {
            primary_cloud: Some(Azure),
            dr_cloud: Some(Aws),
            test_frequency_days: 90,
            test_duration_days: 3,
            failover_day: None,
            failover_duration_days: 7,
        };
        assert!(params.is_test_day(0));
        assert!(params.is_test_day(1));
        assert!(params.is_test_day(2));
        assert!(!params.is_test_day(3));
        assert!(params.is_test_day(90));

        let pattern = WorkloadPattern::DrScenario(params);
        assert_eq!(pattern.factor(1, 365, Aws), 0.5);
        assert!((pattern.factor(10, 365, Aws) - 0.1).abs() < 1e-12);
        assert_eq!(pattern.factor(1, 365, Azure), 1.0);
    }

    #[test]
    fn test_dr_failover_window() {
        let pattern = WorkloadPattern::DrScenario(DrParams {
            primary_cloud: Some(Azure),
            dr_cloud: Some(Aws),
            test_frequency_days: 90,
            test_duration_days: 3,
            failover_day: Some(180),
            failover_duration_days: 5,
        });
        assert_eq!(pattern.factor(179, 365, Azure), 1.0);
        assert!((pattern.factor(180, 365, Azure) - 0.1).abs() < 1e-12);
        assert_eq!(pattern.factor(184, 365, Aws), 2.0);
        // Failover end is exclusive
        assert_eq!(pattern.factor(185, 365, Azure), 1.0);
    }

    #[test]
    fn test_burst_period_boundaries() {
        let pattern = WorkloadPattern::BurstScaling(BurstParams {
            primary_cloud: Some(Gcp),
            burst_cloud: Some(Aws),
            threshold: 0.8,
            frequency_days: 30,
            duration_days: 5,
            overflow_factor: 0.6,
        });
        assert_eq!(pattern.factor(29, 365, Gcp), 0.7);
        assert!((pattern.factor(29, 365, Aws) - 0.1).abs() < 1e-12);
        assert_eq!(pattern.factor(30, 365, Gcp), 0.8);
        assert_eq!(pattern.factor(30, 365, Aws), 0.6);
        assert_eq!(pattern.factor(30, 365, Azure), 1.0);
    }

    #[test]
    fn test_repatriation_ramps_down_to_residual() {
        let pattern = WorkloadPattern::CloudRepatriation(RepatriationParams {
            cloud_source: Some(Aws),
            start_ratio: 0.3,
            duration_ratio: 0.4,
        });
        assert_eq!(pattern.factor(0, 100, Aws), 1.0);
        assert!((pattern.factor(50, 100, Aws) - 0.65).abs() < 1e-12);
        assert!((pattern.factor(99, 100, Aws) - 0.3).abs() < 1e-12);
        assert_eq!(pattern.factor(99, 100, Gcp), 1.0);
    }

    #[test]
    fn test_zero_duration_window_is_instantaneous() {
        let pattern = WorkloadPattern::Migration(MigrationParams {
            source_cloud: Some(Aws),
            target_cloud: Some(Gcp),
            start_ratio: 0.5,
            duration_ratio: 0.0,
        });
        assert_eq!(pattern.factor(49, 100, Aws), 1.0);
        assert!((pattern.factor(50, 100, Aws) - 0.1).abs() < 1e-12);
        assert_eq!(pattern.factor(50, 100, Gcp), 1.0);
    }

    #[test]
    fn test_unknown_pattern_tag_deserializes_to_steady_state() {
        let json = r#"{"type": "quantum_bursting", "params": {"whatever": 1}}"#;
        let pattern: WorkloadPattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern, WorkloadPattern::SteadyState);
    }

    #[test]
    fn test_missing_params_fall_back_to_defaults() {
        let json = r#"{"type": "burst_scaling", "params": {"primary_cloud": "gcp"}}"#;
        let pattern: WorkloadPattern = serde_json::from_str(json).unwrap();
        match pattern {
            WorkloadPattern::BurstScaling(p) => {
                assert_eq!(p.primary_cloud, Some(Gcp));
                assert_eq!(p.burst_cloud, None);
                assert_eq!(p.threshold, 0.8);
                assert_eq!(p.frequency_days, 30);
                assert_eq!(p.duration_days, 5);
                assert_eq!(p.overflow_factor, 0.6);
            }
            other => panic!("expected burst_scaling, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_without_params_key() {
        let json = r#"{"type": "steady_state"}"#;
        let pattern: WorkloadPattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern, WorkloadPattern::SteadyState);

        let json = r#"{"type": "migration"}"#;
        let pattern: WorkloadPattern = serde_json::from_str(json).unwrap();
        match pattern {
            WorkloadPattern::Migration(p) => {
                assert_eq!(p.source_cloud, None);
                assert_eq!(p.start_ratio, 0.3);
                assert_eq!(p.duration_ratio, 0.3);
            }
            other => panic!("expected migration, got {other:?}"),
        }
    }
}
