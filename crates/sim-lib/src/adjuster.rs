//! Day-specific record adjustment
//!
//! The per-provider generators are invoked once per project with a budget
//! derived from each cloud's static percentage. To turn that flat output
//! into the day-varying curve the project pattern describes, the adjuster
//! retroactively rescales the cost fields of records dated on a specific
//! day by that day's pattern factor. Only cost fields are mutated.

use chrono::NaiveDate;
use serde_json::Value;

use crate::models::{CloudProvider, MultiCloudProject, RawRecord};

/// Provider-specific date and cost field names
///
/// AWS carries an ISO-8601 timestamp and two cost columns (unblended and
/// blended); GCP carries an ISO-8601 timestamp and one cost column; Azure
/// carries a plain `YYYY-MM-DD` date and one cost column.
fn date_key(cloud: CloudProvider) -> &'static str {
    match cloud {
        CloudProvider::Aws => "lineItem/UsageStartDate",
        CloudProvider::Gcp => "usage_start_time",
        CloudProvider::Azure => "Date",
    }
}

fn cost_keys(cloud: CloudProvider) -> &'static [&'static str] {
    match cloud {
        CloudProvider::Aws => &["lineItem/UnblendedCost", "lineItem/BlendedCost"],
        CloudProvider::Gcp => &["cost"],
        CloudProvider::Azure => &["Cost"],
    }
}

/// Rescale cost fields of records that fall on `day_index`
///
/// Records whose date field is missing or unparsable are skipped and left
/// unadjusted. All non-cost fields are untouched.
pub fn apply_pattern_adjustments(
    records: &mut [RawRecord],
    cloud: CloudProvider,
    project: &MultiCloudProject,
    day_index: u32,
    total_days: u32,
    start_date: NaiveDate,
) {
    let factor = project.pattern.factor(day_index, total_days, cloud);
    if factor == 1.0 {
        return;
    }

    for record in records.iter_mut() {
        let Some(record_date) = extract_date(record, cloud) else {
            continue;
        };
        let record_day_index = (record_date - start_date).num_days();
        if record_day_index != i64::from(day_index) {
            continue;
        }
        for key in cost_keys(cloud) {
            scale_field(record, key, factor);
        }
    }
}

fn extract_date(record: &RawRecord, cloud: CloudProvider) -> Option<NaiveDate> {
    let raw = record.get(date_key(cloud))?.as_str()?;
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn scale_field(record: &mut RawRecord, key: &str, factor: f64) {
    let Some(value) = record.get_mut(key) else {
        return;
    };
    let Some(current) = value.as_f64() else {
        return;
    };
    if let Some(scaled) = serde_json::Number::from_f64(current * factor) {
        *value = Value::Number(scaled);
    }
}
