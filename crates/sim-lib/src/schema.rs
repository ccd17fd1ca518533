//! Canonical schema normalization
//!
//! Each provider's generator emits records with its native billing-export
//! field names. This module maps those heterogeneous shapes onto the one
//! [`NormalizedRecord`] schema used by all cross-cloud analytics.
//!
//! Normalization is a total function: missing string fields become empty
//! strings, missing or unparsable numeric fields become 0.0, and dates
//! with a time component are truncated to `YYYY-MM-DD`.

use serde_json::Value;

use crate::models::{CloudProvider, NormalizedRecord, RawRecord};

/// Normalize one provider record into the canonical schema
pub fn normalize(record: &RawRecord, cloud: CloudProvider, project_name: &str) -> NormalizedRecord {
    match cloud {
        CloudProvider::Aws => NormalizedRecord {
            cloud,
            multi_cloud_project: project_name.to_string(),
            date: date_field(record, "lineItem/UsageStartDate"),
            service: str_field(record, "lineItem/ProductCode"),
            resource_id: str_field(record, "lineItem/ResourceId"),
            cost: num_field(record, "lineItem/UnblendedCost"),
            account_id: str_field(record, "lineItem/UsageAccountId"),
            region: str_field(record, "product/region"),
            usage_quantity: num_field(record, "lineItem/UsageAmount"),
            usage_unit: str_field(record, "pricing/unit"),
        },
        CloudProvider::Gcp => NormalizedRecord {
            cloud,
            multi_cloud_project: project_name.to_string(),
            date: date_field(record, "usage_start_time"),
            service: str_field(record, "service.description"),
            resource_id: str_field(record, "resource.name"),
            cost: num_field(record, "cost"),
            account_id: str_field(record, "project.id"),
            region: str_field(record, "location.region"),
            usage_quantity: num_field(record, "usage.amount"),
            usage_unit: str_field(record, "usage.unit"),
        },
        CloudProvider::Azure => NormalizedRecord {
            cloud,
            multi_cloud_project: project_name.to_string(),
            date: date_field(record, "Date"),
            service: str_field(record, "ServiceName"),
            resource_id: str_field(record, "ResourceId"),
            cost: num_field(record, "Cost"),
            account_id: str_field(record, "SubscriptionId"),
            region: str_field(record, "ResourceLocation"),
            usage_quantity: num_field(record, "Quantity"),
            usage_unit: str_field(record, "UnitOfMeasure"),
        },
    }
}

fn str_field(record: &RawRecord, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numeric field with 0.0 fallback; numeric strings are parsed too
fn num_field(record: &RawRecord, key: &str) -> f64 {
    match record.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Calendar date truncated to `YYYY-MM-DD`
fn date_field(record: &RawRecord, key: &str) -> String {
    let raw = str_field(record, key);
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => raw,
    }
}
