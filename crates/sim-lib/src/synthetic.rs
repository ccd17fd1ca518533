//! Synthetic provider generators
//!
//! Minimal stand-ins for the production per-provider billing
//! synthesizers. They emit records with each provider's native billing
//! export field names, spreading the daily budget across the configured
//! services and stages with a small random volatility, shaped by the
//! slice's base lifecycle. Deterministic for a fixed seed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use anyhow::Result;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::generator::{GeneratorOutput, GeneratorRequest, UsageGenerator};
use crate::models::{CloudProvider, Lifecycle, RawRecord};

/// Deterministic synthetic billing generator for one provider
pub struct SyntheticGenerator {
    provider: CloudProvider,
    volatility: f64,
    seed: u64,
}

impl SyntheticGenerator {
    pub fn new(provider: CloudProvider, volatility: f64, seed: u64) -> Self {
        Self {
            provider,
            volatility,
            seed,
        }
    }

    /// One generator per supported provider
    pub fn all(volatility: f64, seed: u64) -> Vec<Box<dyn UsageGenerator>> {
        CloudProvider::ALL
            .iter()
            .map(|&provider| {
                Box::new(SyntheticGenerator::new(provider, volatility, seed))
                    as Box<dyn UsageGenerator>
            })
            .collect()
    }

    fn rng_for(&self, project_name: &str) -> StdRng {
        let mut hasher = DefaultHasher::new();
        project_name.hash(&mut hasher);
        self.provider.as_str().hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }

    fn jitter(&self, rng: &mut StdRng) -> f64 {
        if self.volatility > 0.0 {
            1.0 + rng.gen_range(-self.volatility..=self.volatility)
        } else {
            1.0
        }
    }
}

/// Daily volume multiplier for the slice's base lifecycle
fn lifecycle_factor(lifecycle: Lifecycle, day_index: u32, day_count: u32) -> f64 {
    let span = day_count.saturating_sub(1).max(1);
    let progress = f64::from(day_index) / f64::from(span);
    match lifecycle {
        Lifecycle::SteadyState => 1.0,
        Lifecycle::Growing => 0.5 + progress,
        Lifecycle::Declining => 1.5 - progress,
    }
}

fn obj(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        // json! with an object literal always yields an object
        _ => RawRecord::new(),
    }
}

impl UsageGenerator for SyntheticGenerator {
    fn provider(&self) -> CloudProvider {
        self.provider
    }

    fn generate(
        &self,
        project_name: &str,
        request: &GeneratorRequest,
        day_count: u32,
        start_date: NaiveDate,
        daily_budget: f64,
    ) -> Result<GeneratorOutput> {
        let mut rng = self.rng_for(project_name);
        let mut output = GeneratorOutput::default();

        let slots = (request.services.len() * request.stages.len()).max(1) as f64;
        let base_cost = daily_budget / slots;

        for day in 0..day_count {
            let date = start_date + Days::new(u64::from(day));
            let shape = lifecycle_factor(request.lifecycle, day, day_count);

            for service in &request.services {
                for stage in &request.stages {
                    let cost = base_cost * shape * self.jitter(&mut rng);
                    let usage_hours = 24.0 * shape;
                    output.billing.push(self.billing_record(
                        request, date, service, stage, cost, usage_hours,
                    ));
                }
            }
        }

        for stage in &request.stages {
            output.tags.push(self.tag_record(request, stage));
        }

        Ok(output)
    }
}

impl SyntheticGenerator {
    fn billing_record(
        &self,
        request: &GeneratorRequest,
        date: NaiveDate,
        service: &str,
        stage: &str,
        cost: f64,
        usage_hours: f64,
    ) -> RawRecord {
        let day = date.format("%Y-%m-%d");
        match self.provider {
            CloudProvider::Aws => obj(json!({
                "lineItem/UsageStartDate": format!("{day}T00:00:00Z"),
                "lineItem/ProductCode": service,
                "lineItem/ResourceId": format!("i-{stage}-{}", service.to_lowercase()),
                "lineItem/UnblendedCost": cost,
                "lineItem/BlendedCost": cost,
                "lineItem/UsageAccountId": "123456789012",
                "product/region": "us-east-1",
                "lineItem/UsageAmount": usage_hours,
                "pricing/unit": "Hrs",
            })),
            CloudProvider::Gcp => obj(json!({
                "usage_start_time": format!("{day}T00:00:00Z"),
                "service.description": service,
                "resource.name": format!("projects/{}/resources/{}-{stage}",
                    request.multi_cloud_project.to_lowercase(), service.to_lowercase()),
                "cost": cost,
                "project.id": request.multi_cloud_project.to_lowercase(),
                "location.region": "us-central1",
                "usage.amount": usage_hours,
                "usage.unit": "hours",
            })),
            CloudProvider::Azure => obj(json!({
                "Date": day.to_string(),
                "ServiceName": service,
                "ResourceId": format!("/resourceGroups/{stage}/providers/{service}"),
                "Cost": cost,
                "SubscriptionId": "00000000-0000-0000-0000-000000000001",
                "ResourceLocation": "eastus",
                "Quantity": usage_hours,
                "UnitOfMeasure": "Hours",
            })),
        }
    }

    fn tag_record(&self, request: &GeneratorRequest, stage: &str) -> RawRecord {
        match self.provider {
            CloudProvider::Aws => obj(json!({
                "resourceTags/user:stage": stage,
                "resourceTags/user:business_unit": request.business_unit,
                "resourceTags/user:multi_cloud_project": request.multi_cloud_project,
            })),
            CloudProvider::Gcp => obj(json!({
                "labels.stage": stage,
                "labels.business_unit": request.business_unit,
                "labels.multi_cloud_project": request.multi_cloud_project,
            })),
            CloudProvider::Azure => obj(json!({
                "Tags": format!(
                    "stage:{stage};business_unit:{};multi_cloud_project:{}",
                    request.business_unit, request.multi_cloud_project
                ),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(lifecycle: Lifecycle) -> GeneratorRequest {
        GeneratorRequest {
            description: "test".to_string(),
            use_case: "Enterprise Applications".to_string(),
            lifecycle,
            services: vec!["EC2".to_string(), "RDS".to_string()],
            stages: vec!["prod".to_string()],
            business_unit: "Retail".to_string(),
            multi_cloud_project: "RetailPlatformMigration".to_string(),
            cloud_percentage: 0.8,
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_record_count_and_budget_spread() {
        let generator = SyntheticGenerator::new(CloudProvider::Aws, 0.0, 42);
        let output = generator
            .generate("p", &request(Lifecycle::SteadyState), 10, start(), 200.0)
            .unwrap();

        // 2 services x 1 stage x 10 days
        assert_eq!(output.billing.len(), 20);
        assert_eq!(output.tags.len(), 1);

        // Zero volatility, steady lifecycle: every slot gets budget / slots
        for record in &output.billing {
            let cost = record["lineItem/UnblendedCost"].as_f64().unwrap();
            assert!((cost - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let a = SyntheticGenerator::new(CloudProvider::Gcp, 0.05, 7)
            .generate("p", &request(Lifecycle::Growing), 5, start(), 100.0)
            .unwrap();
        let b = SyntheticGenerator::new(CloudProvider::Gcp, 0.05, 7)
            .generate("p", &request(Lifecycle::Growing), 5, start(), 100.0)
            .unwrap();
        assert_eq!(a.billing, b.billing);
    }

    #[test]
    fn test_growing_lifecycle_ramps_costs() {
        let generator = SyntheticGenerator::new(CloudProvider::Azure, 0.0, 1);
        let output = generator
            .generate("p", &request(Lifecycle::Growing), 10, start(), 100.0)
            .unwrap();
        let first = output.billing.first().unwrap()["Cost"].as_f64().unwrap();
        let last = output.billing.last().unwrap()["Cost"].as_f64().unwrap();
        assert!(last > first * 2.0);
    }

    #[test]
    fn test_dates_cover_the_run() {
        let generator = SyntheticGenerator::new(CloudProvider::Azure, 0.0, 1);
        let output = generator
            .generate("p", &request(Lifecycle::SteadyState), 3, start(), 100.0)
            .unwrap();
        let dates: Vec<&str> = output
            .billing
            .iter()
            .map(|r| r["Date"].as_str().unwrap())
            .collect();
        assert!(dates.contains(&"2026-01-01"));
        assert!(dates.contains(&"2026-01-03"));
        assert!(!dates.contains(&"2026-01-04"));
    }
}
