//! Performance lookup over free-form target records.
//!
//! Target records join to users by the `RepName` string rather than a stable
//! id; differently-spelled entries for one person, or two reps sharing a
//! name, silently merge. That behavior is carried over deliberately; see
//! DESIGN.md.

use salespulse_core::TargetRecord;
use serde_json::Value;

/// Key of the rep display name in a target record.
pub const REP_NAME: &str = "RepName";
/// Key of the month field (number or numeric string).
pub const MONTH: &str = "Month";
/// Key of the year field (number or numeric string).
pub const YEAR: &str = "Year";
/// Key of the value target amount in a value-target record.
pub const VALUE_TARGET: &str = "ValueTarget";
/// Key of the achieved value amount in a value-target record.
pub const VALUE_ACHIEVEMENT: &str = "ValueAchievement";

/// Result of a rep performance lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RepPerformance {
    /// Quantity-target records matching the rep and period, upload order.
    pub quantity: Vec<TargetRecord>,
    /// Value attainment from the first matching value-target record.
    pub value: Option<ValueAttainment>,
}

/// Target and achieved value amounts for one rep/month/year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAttainment {
    pub target: f64,
    pub achieved: f64,
}

/// Loose equality between two JSON values, coercing across numbers and
/// numeric strings: `3` matches `"3"`, `"2024"` matches `2024`.
///
/// Uploads carry Month/Year as whatever cell type the spreadsheet had, while
/// queries pass whatever type the caller holds, so the comparison has to
/// bridge the two.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Null, Value::Null) => true,
        _ => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Parse a value-target metric as f64, defaulting to 0 on any failure.
pub fn metric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Whether a target record belongs to one of `names` for the given period.
pub(crate) fn matches(record: &TargetRecord, names: &[&str], month: &Value, year: &Value) -> bool {
    let rep = record.get(REP_NAME).and_then(Value::as_str);
    rep.is_some_and(|r| names.contains(&r))
        && record.get(MONTH).is_some_and(|m| loose_eq(m, month))
        && record.get(YEAR).is_some_and(|y| loose_eq(y, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> TargetRecord {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn loose_eq_bridges_numbers_and_strings() {
        assert!(loose_eq(&json!(3), &json!("3")));
        assert!(loose_eq(&json!("2024"), &json!(2024)));
        assert!(loose_eq(&json!(3.0), &json!(3)));
        assert!(loose_eq(&json!(" 7 "), &json!(7)));
    }

    #[test]
    fn loose_eq_rejects_mismatches() {
        assert!(!loose_eq(&json!(3), &json!("4")));
        assert!(!loose_eq(&json!("march"), &json!(3)));
        assert!(!loose_eq(&json!("march"), &json!("April")));
        assert!(!loose_eq(&json!(null), &json!(0)));
    }

    #[test]
    fn metric_defaults_to_zero() {
        assert_eq!(metric(Some(&json!("100"))), 100.0);
        assert_eq!(metric(Some(&json!(80.5))), 80.5);
        assert_eq!(metric(Some(&json!("n/a"))), 0.0);
        assert_eq!(metric(Some(&json!(null))), 0.0);
        assert_eq!(metric(None), 0.0);
    }

    #[test]
    fn matches_requires_name_and_period() {
        let target = record(json!({
            "RepName": "Rep John",
            "Month": "3",
            "Year": 2024,
            "Model": "X100",
            "Target": 20
        }));

        assert!(matches(&target, &["Rep John"], &json!(3), &json!("2024")));
        assert!(!matches(&target, &["Rep Jane"], &json!(3), &json!("2024")));
        assert!(!matches(&target, &["Rep John"], &json!(4), &json!("2024")));
        assert!(!matches(&target, &["Rep John"], &json!(3), &json!(2023)));
    }

    #[test]
    fn matches_ignores_records_missing_fields() {
        let no_name = record(json!({ "Month": 3, "Year": 2024 }));
        assert!(!matches(&no_name, &["Rep John"], &json!(3), &json!(2024)));

        let no_period = record(json!({ "RepName": "Rep John" }));
        assert!(!matches(&no_period, &["Rep John"], &json!(3), &json!(2024)));
    }
}
