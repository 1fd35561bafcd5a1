//! # MGNREGA Stats
//!
//! A library for aggregating cumulative monthly MGNREGA performance records
//! into the district, state, and year-level summaries a public information
//! dashboard serves.
//!
//! ## Core Concepts
//!
//! - **Cumulative Records**: the open-data feed publishes one row per
//!   (district, financial year, month) whose metrics accumulate from April
//!   onward. A year's totals are therefore read off the *latest* reporting
//!   month, never summed across months.
//! - **Financial Year**: April through March, labeled `"2023-2024"`.
//! - **Latest-Month Resolution**: both the all-districts aggregation and the
//!   single-district detail view rank months with the same static table, so
//!   the two paths can never disagree about which month is "latest".
//! - **Graceful Degradation**: missing fields are `None` ("not reported"),
//!   distinct from reported zeros. Persondays fall back through an ordered
//!   candidate chain; non-positive wage rates are excluded from means.
//! - **Unit Discipline**: the feed reports currency totals in lakhs; they
//!   convert to rupees exactly once, at field read-out. The average wage
//!   rate is already in rupees per day and is never converted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mgnrega_stats::{DashboardService, InMemoryStore, parse_api_response};
//!
//! let payload = fetch_feed_snapshot()?; // external collaborator
//! let store = InMemoryStore::from_records(parse_api_response(&payload, "2023-2024"));
//! let service = DashboardService::new(store);
//!
//! let summary = service.year_summary("2023-2024")?;
//! for district in &summary.district_summaries {
//!     println!("{}: {} persondays", district.district, district.persondays);
//! }
//! ```

pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod months;
pub mod schema;
pub mod store;
pub mod units;
pub mod utils;

pub use aggregate::{
    district_detail_summary, district_summaries, latest_record, overall_summary,
    persondays_worked, positive_mean, state_summaries,
};
pub use error::{DashboardError, Result};
pub use ingest::{parse_api_record, parse_api_response};
pub use months::month_rank;
pub use schema::*;
pub use store::{InMemoryStore, PerformanceStore};
pub use units::{lakhs_to_rupees, rupees_to_crores};
pub use utils::validate_fin_year_label;

use log::{debug, info};

/// The dashboard's query surface over a record store. Stateless: every call
/// reads one year's rows and computes summaries in memory, retaining nothing
/// between requests.
pub struct DashboardService<S: PerformanceStore> {
    store: S,
}

impl<S: PerformanceStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// District, state, and overall summaries for one financial year.
    /// A year matching zero rows is `YearNotFound`, deliberately distinct
    /// from a year whose rows are all nulls (which yields zero-valued
    /// summaries).
    pub fn year_summary(&self, fin_year: &str) -> Result<YearSummary> {
        utils::validate_fin_year_label(fin_year)?;

        let records = self.store.query_by_year(fin_year)?;
        if records.is_empty() {
            return Err(DashboardError::YearNotFound(fin_year.to_string()));
        }

        info!(
            "computing year summary for {} from {} records",
            fin_year,
            records.len()
        );

        let district_summaries = aggregate::district_summaries(&records);
        let state_summaries = aggregate::state_summaries(&district_summaries);
        let overall = aggregate::overall_summary(&district_summaries);

        debug!(
            "{}: {} districts across {} states",
            fin_year,
            district_summaries.len(),
            state_summaries.len()
        );

        Ok(YearSummary {
            fin_year: fin_year.to_string(),
            district_summaries,
            state_summaries,
            overall,
        })
    }

    /// One district's records for a year plus its headline summary.
    pub fn district_detail(&self, district: &str, fin_year: &str) -> Result<DistrictDetail> {
        utils::validate_fin_year_label(fin_year)?;

        let records = self.store.query_by_district_and_year(district, fin_year)?;
        let summary = aggregate::district_detail_summary(&records).ok_or_else(|| {
            DashboardError::DistrictNotFound {
                district: district.to_string(),
                fin_year: fin_year.to_string(),
            }
        })?;

        info!(
            "computed detail for {} in {} from {} monthly records",
            district,
            fin_year,
            records.len()
        );

        Ok(DistrictDetail {
            district: district.to_string(),
            fin_year: fin_year.to_string(),
            records,
            summary,
        })
    }

    /// Financial years the store has data for, newest first.
    pub fn available_years(&self) -> Result<Vec<String>> {
        self.store.distinct_years()
    }

    /// Districts the store has data for, ascending by name.
    pub fn districts(&self) -> Result<Vec<DistrictInfo>> {
        self.store.districts()
    }
}

pub fn year_summary<S: PerformanceStore>(store: &S, fin_year: &str) -> Result<YearSummary> {
    DashboardService::new(store).year_summary(fin_year)
}

pub fn district_detail<S: PerformanceStore>(
    store: &S,
    district: &str,
    fin_year: &str,
) -> Result<DistrictDetail> {
    DashboardService::new(store).district_detail(district, fin_year)
}
