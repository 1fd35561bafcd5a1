use crate::error::Result;
use crate::months::month_rank;
use crate::schema::{DistrictInfo, PerformanceRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Query interface over the record store. Implementations own persistence,
/// retries, and timeouts; the aggregation layer consumes this read-only and
/// maps failures to `DashboardError::StoreUnavailable`.
pub trait PerformanceStore {
    /// All records for a financial year, district info joined in. Ordered by
    /// district name then month rank; the ordering is for readability, the
    /// aggregation does not rely on it.
    fn query_by_year(&self, fin_year: &str) -> Result<Vec<PerformanceRecord>>;

    /// All records for one district and year, in month-rank order.
    fn query_by_district_and_year(
        &self,
        district: &str,
        fin_year: &str,
    ) -> Result<Vec<PerformanceRecord>>;

    /// Distinct financial year labels, newest first.
    fn distinct_years(&self) -> Result<Vec<String>>;

    /// Known districts, ascending by name.
    fn districts(&self) -> Result<Vec<DistrictInfo>>;
}

impl<S: PerformanceStore + ?Sized> PerformanceStore for &S {
    fn query_by_year(&self, fin_year: &str) -> Result<Vec<PerformanceRecord>> {
        (**self).query_by_year(fin_year)
    }

    fn query_by_district_and_year(
        &self,
        district: &str,
        fin_year: &str,
    ) -> Result<Vec<PerformanceRecord>> {
        (**self).query_by_district_and_year(district, fin_year)
    }

    fn distinct_years(&self) -> Result<Vec<String>> {
        (**self).distinct_years()
    }

    fn districts(&self) -> Result<Vec<DistrictInfo>> {
        (**self).districts()
    }
}

/// Vec-backed store for tests and for callers that load a feed snapshot into
/// memory. `upsert` enforces the (district, fin_year, month) natural key the
/// same way the ingestion side does against the real database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<PerformanceRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = PerformanceRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.upsert(record);
        }
        store
    }

    /// Inserts the record, replacing any existing record with the same
    /// (district name, fin_year, month) key.
    pub fn upsert(&mut self, record: PerformanceRecord) {
        let existing = self.records.iter_mut().find(|r| {
            r.district.name == record.district.name
                && r.fin_year == record.fin_year
                && r.month == record.month
        });
        match existing {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PerformanceStore for InMemoryStore {
    fn query_by_year(&self, fin_year: &str) -> Result<Vec<PerformanceRecord>> {
        let mut records: Vec<PerformanceRecord> = self
            .records
            .iter()
            .filter(|r| r.fin_year == fin_year)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.district
                .name
                .cmp(&b.district.name)
                .then(month_rank(&a.month).cmp(&month_rank(&b.month)))
        });
        Ok(records)
    }

    fn query_by_district_and_year(
        &self,
        district: &str,
        fin_year: &str,
    ) -> Result<Vec<PerformanceRecord>> {
        let mut records: Vec<PerformanceRecord> = self
            .records
            .iter()
            .filter(|r| r.district.name == district && r.fin_year == fin_year)
            .cloned()
            .collect();
        records.sort_by_key(|r| month_rank(&r.month));
        Ok(records)
    }

    fn distinct_years(&self) -> Result<Vec<String>> {
        let years: BTreeSet<&str> = self.records.iter().map(|r| r.fin_year.as_str()).collect();
        Ok(years.into_iter().rev().map(str::to_string).collect())
    }

    fn districts(&self) -> Result<Vec<DistrictInfo>> {
        let by_name: BTreeMap<&str, &DistrictInfo> = self
            .records
            .iter()
            .map(|r| (r.district.name.as_str(), &r.district))
            .collect();
        Ok(by_name.into_values().cloned().collect())
    }
}
