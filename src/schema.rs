use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DistrictInfo {
    #[schemars(description = "District name as reported by the open-data feed (e.g. 'ANANTAPUR')")]
    pub name: String,

    #[schemars(description = "Name of the state the district belongs to (e.g. 'ANDHRA PRADESH')")]
    pub state_name: String,
}

/// One cumulative monthly snapshot for a district. Metric values accumulate
/// from the start of the financial year (April) through the named month; they
/// are not per-month deltas. `None` means the feed did not report the field,
/// which is distinct from a reported zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceRecord {
    #[schemars(description = "District identity, joined from the district register")]
    pub district: DistrictInfo,

    #[schemars(description = "Financial year label in the form '2023-2024' (April through March)")]
    pub fin_year: String,

    #[schemars(
        description = "Reporting month name as the feed spells it ('April', 'Sept', 'January', ...)"
    )]
    pub month: String,

    #[serde(rename = "Approved_Labour_Budget")]
    #[schemars(description = "Approved labour budget in persondays")]
    pub approved_labour_budget: Option<f64>,

    #[serde(rename = "Average_Wage_rate_per_day_per_person")]
    #[schemars(
        description = "Average wage rate in rupees per day per person. Already in base currency units; never subject to the lakh conversion."
    )]
    pub average_wage_rate_per_day_per_person: Option<f64>,

    #[serde(rename = "Average_days_of_employment_provided_per_Household")]
    #[schemars(description = "Average days of employment provided per household (not per individual)")]
    pub average_days_of_employment_provided_per_household: Option<f64>,

    #[serde(rename = "Differently_abled_persons_worked")]
    pub differently_abled_persons_worked: Option<i64>,

    #[serde(rename = "Material_and_skilled_Wages")]
    #[schemars(description = "Material and skilled wages paid, in lakhs of rupees")]
    pub material_and_skilled_wages: Option<f64>,

    #[serde(rename = "Number_of_Completed_Works")]
    pub number_of_completed_works: Option<i64>,

    #[serde(rename = "Number_of_GPs_with_NIL_exp")]
    #[schemars(description = "Number of gram panchayats with nil expenditure")]
    pub number_of_gps_with_nil_exp: Option<i64>,

    #[serde(rename = "Number_of_Ongoing_Works")]
    pub number_of_ongoing_works: Option<i64>,

    #[serde(rename = "Persondays_of_Central_Liability_so_far")]
    #[schemars(description = "Total persondays of central liability so far this financial year")]
    pub persondays_of_central_liability_so_far: Option<f64>,

    #[serde(rename = "SC_persondays")]
    pub sc_persondays: Option<f64>,

    #[serde(rename = "ST_persondays")]
    pub st_persondays: Option<f64>,

    #[serde(rename = "Total_Exp")]
    #[schemars(description = "Total expenditure, in lakhs of rupees")]
    pub total_exp: Option<f64>,

    #[serde(rename = "Total_Households_Worked")]
    pub total_households_worked: Option<i64>,

    #[serde(rename = "Total_Individuals_Worked")]
    pub total_individuals_worked: Option<i64>,

    #[serde(rename = "Wages")]
    #[schemars(description = "Wages paid, in lakhs of rupees")]
    pub wages: Option<f64>,

    #[serde(rename = "Women_Persondays")]
    pub women_persondays: Option<f64>,

    #[serde(rename = "Remarks")]
    pub remarks: Option<String>,
}

impl PerformanceRecord {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PerformanceRecord)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Per-district summary for one financial year, seeded from that district's
/// latest reporting month. Recomputed on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSummary {
    pub district: String,
    pub state: String,
    pub active_workers: i64,
    pub households: i64,
    /// Rounded to the nearest integer. May be an estimate when the feed
    /// omits the reported persondays fields.
    pub persondays: i64,
    pub women_persondays: f64,
    pub assets_completed: i64,
    /// In rupees (converted from the feed's lakh figures).
    pub total_expenditure: f64,
    /// In rupees per day per person, straight from the latest record.
    pub avg_wage_rate: f64,
}

/// Additive rollup of district summaries sharing a state name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub state: String,
    pub active_workers: i64,
    pub persondays: i64,
    pub assets_completed: i64,
    pub total_expenditure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub total_households: i64,
    /// Simple mean of per-district rates, non-positive rates excluded.
    pub average_wage_rate: f64,
    pub women_participation_percent: f64,
    pub total_expenditure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    #[serde(rename = "fin_year")]
    pub fin_year: String,
    pub district_summaries: Vec<DistrictSummary>,
    pub state_summaries: Vec<StateSummary>,
    pub overall: OverallSummary,
}

/// Headline figures for one district and year. The counts and currency
/// totals are a snapshot of the latest reporting month; the wage rate is the
/// mean across all reported months, so the two must not be conflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDetailSummary {
    pub average_wage_rate: f64,
    pub total_households: i64,
    pub total_expenditure: f64,
    pub total_wages: f64,
    pub total_completed_works: i64,
    pub total_ongoing_works: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictDetail {
    pub district: String,
    #[serde(rename = "fin_year")]
    pub fin_year: String,
    pub records: Vec<PerformanceRecord>,
    pub summary: DistrictDetailSummary,
}
