//! Parsing for raw rows from the government open-data feed. The feed is
//! messy in two specific ways: field names flip between the documented
//! headers and all-lowercase spellings, and numeric values arrive as either
//! JSON numbers or comma-grouped strings. Fetching the payload over HTTP is
//! the ingestion collaborator's job; this module only normalizes rows.

use crate::schema::{DistrictInfo, PerformanceRecord};
use log::debug;
use serde_json::{Map, Value};

/// Ordered alias lookup: the first candidate key whose value is present and
/// neither null nor an empty string wins.
pub fn first_defined<'a>(row: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        row.get(*key)
            .filter(|value| !value.is_null() && value.as_str() != Some(""))
    })
}

/// Numeric coercion for feed values: JSON numbers pass through, strings are
/// parsed after stripping thousands separators. Absent, blank, and
/// non-finite values yield `None` so "not reported" survives as `None`
/// rather than collapsing into zero.
pub fn to_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.trim().replace(',', "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Like [`to_number`] but truncated toward zero, for the count fields the
/// feed occasionally reports with a fractional part.
pub fn to_count(value: &Value) -> Option<i64> {
    to_number(value).map(|n| n.trunc() as i64)
}

fn field<'a>(row: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let lower = name.to_lowercase();
    first_defined(row, &[name, lower.as_str()])
}

fn number_field(row: &Map<String, Value>, name: &str) -> Option<f64> {
    field(row, name).and_then(to_number)
}

fn count_field(row: &Map<String, Value>, name: &str) -> Option<i64> {
    field(row, name).and_then(to_count)
}

fn trimmed_text(row: &Map<String, Value>, name: &str) -> Option<String> {
    field(row, name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Converts one feed row into a [`PerformanceRecord`]. Rows without a
/// district name or month cannot be keyed and are skipped.
pub fn parse_api_record(row: &Value, fin_year: &str) -> Option<PerformanceRecord> {
    let row = row.as_object()?;

    let district_name = trimmed_text(row, "district_name")?;
    let month = trimmed_text(row, "month")?;
    let state_name = trimmed_text(row, "state_name").unwrap_or_default();

    Some(PerformanceRecord {
        district: DistrictInfo {
            name: district_name,
            state_name,
        },
        fin_year: fin_year.to_string(),
        month,
        approved_labour_budget: number_field(row, "Approved_Labour_Budget"),
        average_wage_rate_per_day_per_person: number_field(
            row,
            "Average_Wage_rate_per_day_per_person",
        ),
        average_days_of_employment_provided_per_household: number_field(
            row,
            "Average_days_of_employment_provided_per_Household",
        ),
        differently_abled_persons_worked: count_field(row, "Differently_abled_persons_worked"),
        material_and_skilled_wages: number_field(row, "Material_and_skilled_Wages"),
        number_of_completed_works: count_field(row, "Number_of_Completed_Works"),
        number_of_gps_with_nil_exp: count_field(row, "Number_of_GPs_with_NIL_exp"),
        number_of_ongoing_works: count_field(row, "Number_of_Ongoing_Works"),
        persondays_of_central_liability_so_far: number_field(
            row,
            "Persondays_of_Central_Liability_so_far",
        ),
        sc_persondays: number_field(row, "SC_persondays"),
        st_persondays: number_field(row, "ST_persondays"),
        total_exp: number_field(row, "Total_Exp"),
        total_households_worked: count_field(row, "Total_Households_Worked"),
        total_individuals_worked: count_field(row, "Total_Individuals_Worked"),
        wages: number_field(row, "Wages"),
        women_persondays: number_field(row, "Women_Persondays"),
        remarks: trimmed_text(row, "Remarks"),
    })
}

/// Parses a full feed response: reads the `records` array and drops rows
/// that cannot be keyed.
pub fn parse_api_response(payload: &Value, fin_year: &str) -> Vec<PerformanceRecord> {
    let rows = payload
        .get("records")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let records: Vec<PerformanceRecord> = rows
        .iter()
        .filter_map(|row| parse_api_record(row, fin_year))
        .collect();

    debug!(
        "parsed {} of {} feed rows for {}",
        records.len(),
        rows.len(),
        fin_year
    );
    records
}
