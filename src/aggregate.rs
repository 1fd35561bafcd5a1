//! Turns raw cumulative monthly records into the summaries the dashboard
//! serves. Because every metric accumulates from the start of the financial
//! year, a period's totals are read off the latest reporting month rather
//! than summed across months.

use crate::months::month_rank;
use crate::schema::{
    DistrictDetailSummary, DistrictSummary, OverallSummary, PerformanceRecord, StateSummary,
};
use crate::units::lakhs_to_rupees;
use crate::utils::round2;
use std::collections::BTreeMap;

/// Picks the record for the latest reporting month, i.e. the strictly
/// highest month rank. On equal ranks the first record in input order wins;
/// the (district, fin_year, month) natural key should make that unreachable,
/// but the feed is not trusted to enforce it. Returns `None` only for empty
/// input; records with unrecognized month spellings rank 0 and stay
/// eligible.
pub fn latest_record<'a, I>(records: I) -> Option<&'a PerformanceRecord>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    let mut best: Option<(&PerformanceRecord, u8)> = None;
    for record in records {
        let rank = month_rank(&record.month);
        match best {
            Some((_, best_rank)) if rank <= best_rank => {}
            _ => best = Some((record, rank)),
        }
    }
    best.map(|(record, _)| record)
}

/// Total persondays worked, degraded gracefully when the feed omits fields.
/// Ordered candidates, first value above zero wins:
/// 1. the reported persondays of central liability;
/// 2. the SC + ST + women category sum;
/// 3. individuals worked x average days per household. The average-days
///    figure is per household, not per individual, so this last tier is an
///    estimate and consuming UIs should label it as one.
pub fn persondays_worked(record: &PerformanceRecord) -> f64 {
    let category_sum = record.sc_persondays.unwrap_or(0.0)
        + record.st_persondays.unwrap_or(0.0)
        + record.women_persondays.unwrap_or(0.0);

    let reported_candidates = [
        record.persondays_of_central_liability_so_far.unwrap_or(0.0),
        category_sum,
    ];
    if let Some(reported) = reported_candidates.into_iter().find(|v| *v > 0.0) {
        return reported;
    }

    let individuals = record.total_individuals_worked.unwrap_or(0) as f64;
    let avg_days = record
        .average_days_of_employment_provided_per_household
        .unwrap_or(0.0);
    individuals * avg_days
}

/// Mean of the rates that are actually positive. A rate of zero means the
/// month reported nothing useful, so it is excluded rather than dragging
/// the mean down; 0.0 when no positive rate remains.
pub fn positive_mean<I>(rates: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let positive: Vec<f64> = rates.into_iter().filter(|rate| *rate > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    positive.iter().sum::<f64>() / positive.len() as f64
}

fn summarize_district(record: &PerformanceRecord) -> DistrictSummary {
    DistrictSummary {
        district: record.district.name.clone(),
        state: record.district.state_name.clone(),
        active_workers: record.total_individuals_worked.unwrap_or(0),
        households: record.total_households_worked.unwrap_or(0),
        persondays: persondays_worked(record).round() as i64,
        women_persondays: record.women_persondays.unwrap_or(0.0),
        assets_completed: record.number_of_completed_works.unwrap_or(0),
        total_expenditure: lakhs_to_rupees(record.total_exp.unwrap_or(0.0)),
        avg_wage_rate: record.average_wage_rate_per_day_per_person.unwrap_or(0.0),
    }
}

/// One summary per district present in the record set, each seeded from that
/// district's latest-month record. Output is ordered by district name.
pub fn district_summaries(records: &[PerformanceRecord]) -> Vec<DistrictSummary> {
    let mut by_district: BTreeMap<&str, Vec<&PerformanceRecord>> = BTreeMap::new();
    for record in records {
        by_district
            .entry(record.district.name.as_str())
            .or_default()
            .push(record);
    }

    by_district
        .values()
        .filter_map(|group| latest_record(group.iter().copied()))
        .map(summarize_district)
        .collect()
}

/// Additive rollup by state name. No averaging happens here, so the result
/// is independent of input order. Output is ordered by state name.
pub fn state_summaries(summaries: &[DistrictSummary]) -> Vec<StateSummary> {
    let mut by_state: BTreeMap<&str, StateSummary> = BTreeMap::new();
    for summary in summaries {
        let entry = by_state
            .entry(summary.state.as_str())
            .or_insert_with(|| StateSummary {
                state: summary.state.clone(),
                active_workers: 0,
                persondays: 0,
                assets_completed: 0,
                total_expenditure: 0.0,
            });
        entry.active_workers += summary.active_workers;
        entry.persondays += summary.persondays;
        entry.assets_completed += summary.assets_completed;
        entry.total_expenditure += summary.total_expenditure;
    }
    by_state.into_values().collect()
}

/// Year-level headline figures across all districts. The wage rate is a
/// simple mean over district rates (each district counts equally regardless
/// of scale), with non-positive rates excluded before averaging.
pub fn overall_summary(summaries: &[DistrictSummary]) -> OverallSummary {
    let total_households = summaries.iter().map(|s| s.households).sum();
    let total_expenditure = summaries.iter().map(|s| s.total_expenditure).sum();
    let total_persondays: i64 = summaries.iter().map(|s| s.persondays).sum();
    let women_persondays: f64 = summaries.iter().map(|s| s.women_persondays).sum();

    let average_wage_rate = positive_mean(summaries.iter().map(|s| s.avg_wage_rate));
    let women_participation_percent = if total_persondays > 0 {
        women_persondays / total_persondays as f64 * 100.0
    } else {
        0.0
    };

    OverallSummary {
        total_households,
        average_wage_rate: round2(average_wage_rate),
        women_participation_percent: round2(women_participation_percent),
        total_expenditure,
    }
}

/// Headline summary for a single district's records in one year. Counts and
/// currency totals are the latest month's cumulative snapshot; the wage rate
/// is deliberately different, a longitudinal mean across every reported
/// month of the year.
pub fn district_detail_summary(records: &[PerformanceRecord]) -> Option<DistrictDetailSummary> {
    let latest = latest_record(records)?;

    let average_wage_rate = positive_mean(
        records
            .iter()
            .map(|r| r.average_wage_rate_per_day_per_person.unwrap_or(0.0)),
    );

    Some(DistrictDetailSummary {
        average_wage_rate: round2(average_wage_rate),
        total_households: latest.total_households_worked.unwrap_or(0),
        total_expenditure: lakhs_to_rupees(latest.total_exp.unwrap_or(0.0)),
        total_wages: lakhs_to_rupees(latest.wages.unwrap_or(0.0)),
        total_completed_works: latest.number_of_completed_works.unwrap_or(0),
        total_ongoing_works: latest.number_of_ongoing_works.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DistrictInfo;

    fn record(district: &str, state: &str, month: &str) -> PerformanceRecord {
        PerformanceRecord {
            district: DistrictInfo {
                name: district.to_string(),
                state_name: state.to_string(),
            },
            fin_year: "2023-2024".to_string(),
            month: month.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_latest_record_picks_highest_rank() {
        let records = vec![
            record("Alpha", "X", "April"),
            record("Alpha", "X", "January"),
            record("Alpha", "X", "Sept"),
        ];

        let latest = latest_record(&records).unwrap();
        assert_eq!(latest.month, "January");
        for r in &records {
            assert!(month_rank(&latest.month) >= month_rank(&r.month));
        }
    }

    #[test]
    fn test_latest_record_tie_keeps_first_in_input_order() {
        let mut first = record("Alpha", "X", "Sept");
        first.total_households_worked = Some(10);
        let mut duplicate = record("Alpha", "X", "September");
        duplicate.total_households_worked = Some(99);

        let binding = [first, duplicate];
        let latest = latest_record(&binding[..]).unwrap();
        assert_eq!(latest.total_households_worked, Some(10));
    }

    #[test]
    fn test_latest_record_unrecognized_month_still_eligible() {
        let records = vec![record("Alpha", "X", "Smarch")];
        let latest = latest_record(&records).unwrap();
        assert_eq!(latest.month, "Smarch");

        // But any recognized month outranks it.
        let records = vec![record("Alpha", "X", "Smarch"), record("Alpha", "X", "April")];
        assert_eq!(latest_record(&records).unwrap().month, "April");
    }

    #[test]
    fn test_latest_record_empty_input() {
        let empty: Vec<PerformanceRecord> = Vec::new();
        assert!(latest_record(&empty).is_none());
    }

    #[test]
    fn test_persondays_prefers_central_liability() {
        let mut r = record("Alpha", "X", "May");
        r.persondays_of_central_liability_so_far = Some(1000.0);
        r.sc_persondays = Some(400.0);
        r.st_persondays = Some(300.0);
        r.women_persondays = Some(200.0);
        r.total_individuals_worked = Some(50);
        r.average_days_of_employment_provided_per_household = Some(8.0);

        assert_eq!(persondays_worked(&r), 1000.0);
    }

    #[test]
    fn test_persondays_falls_back_to_category_sum() {
        let mut r = record("Alpha", "X", "May");
        r.persondays_of_central_liability_so_far = Some(0.0);
        r.sc_persondays = Some(200.0);
        r.st_persondays = Some(100.0);
        r.women_persondays = Some(150.0);

        assert_eq!(persondays_worked(&r), 450.0);

        r.persondays_of_central_liability_so_far = None;
        assert_eq!(persondays_worked(&r), 450.0);
    }

    #[test]
    fn test_persondays_last_resort_estimate() {
        let mut r = record("Alpha", "X", "May");
        r.total_individuals_worked = Some(100);
        r.average_days_of_employment_provided_per_household = Some(10.0);

        assert_eq!(persondays_worked(&r), 1000.0);

        // Everything absent: the estimate degrades to zero rather than failing.
        let bare = record("Alpha", "X", "May");
        assert_eq!(persondays_worked(&bare), 0.0);
    }

    #[test]
    fn test_positive_mean_excludes_non_positive() {
        assert_eq!(positive_mean([250.0, 0.0, -5.0]), 250.0);
        assert_eq!(positive_mean([200.0, 220.0]), 210.0);
        assert_eq!(positive_mean([0.0, 0.0]), 0.0);
        assert_eq!(positive_mean(Vec::new()), 0.0);
    }

    #[test]
    fn test_district_summaries_one_per_district() {
        let mut alpha_april = record("Alpha", "X", "April");
        alpha_april.total_households_worked = Some(40);
        let mut alpha_august = record("Alpha", "X", "August");
        alpha_august.total_households_worked = Some(80);
        alpha_august.total_individuals_worked = Some(100);
        alpha_august.total_exp = Some(2.0);
        let mut beta_may = record("Beta", "X", "May");
        beta_may.total_households_worked = Some(40);

        let summaries = district_summaries(&[alpha_april, alpha_august, beta_may]);
        assert_eq!(summaries.len(), 2);

        let alpha = &summaries[0];
        assert_eq!(alpha.district, "Alpha");
        assert_eq!(alpha.households, 80);
        assert_eq!(alpha.active_workers, 100);
        assert_eq!(alpha.total_expenditure, 200_000.0);
    }

    #[test]
    fn test_wage_rate_is_not_lakh_converted() {
        let mut r = record("Alpha", "X", "August");
        r.average_wage_rate_per_day_per_person = Some(250.0);
        r.total_exp = Some(250.0);

        let summaries = district_summaries(&[r]);
        // Expenditure converts; the wage rate passes through untouched.
        assert_eq!(summaries[0].total_expenditure, 25_000_000.0);
        assert_eq!(summaries[0].avg_wage_rate, 250.0);
    }

    #[test]
    fn test_state_summaries_sum_and_are_order_independent() {
        let make = |district: &str, state: &str, workers: i64, persondays: i64| DistrictSummary {
            district: district.to_string(),
            state: state.to_string(),
            active_workers: workers,
            households: 10,
            persondays,
            women_persondays: 0.0,
            assets_completed: 1,
            total_expenditure: 1_000.0,
            avg_wage_rate: 200.0,
        };

        let summaries = vec![
            make("Alpha", "X", 100, 450),
            make("Beta", "X", 50, 1000),
            make("Gamma", "Y", 30, 200),
        ];
        let mut shuffled = summaries.clone();
        shuffled.reverse();

        let states = state_summaries(&summaries);
        assert_eq!(states, state_summaries(&shuffled));
        assert_eq!(states.len(), 2);

        let x = states.iter().find(|s| s.state == "X").unwrap();
        assert_eq!(x.active_workers, 150);
        assert_eq!(x.persondays, 1450);
        assert_eq!(x.assets_completed, 2);
        assert_eq!(x.total_expenditure, 2_000.0);
    }

    #[test]
    fn test_overall_summary_zero_persondays_guard() {
        let summaries = vec![DistrictSummary {
            district: "Alpha".to_string(),
            state: "X".to_string(),
            active_workers: 0,
            households: 0,
            persondays: 0,
            women_persondays: 0.0,
            assets_completed: 0,
            total_expenditure: 0.0,
            avg_wage_rate: 0.0,
        }];

        let overall = overall_summary(&summaries);
        assert_eq!(overall.women_participation_percent, 0.0);
        assert_eq!(overall.average_wage_rate, 0.0);
    }

    #[test]
    fn test_women_participation_not_capped_at_hundred() {
        // Raw women persondays can legitimately exceed the fallback-derived
        // total; the percentage reports whatever the arithmetic says.
        let summaries = vec![DistrictSummary {
            district: "Alpha".to_string(),
            state: "X".to_string(),
            active_workers: 10,
            households: 10,
            persondays: 100,
            women_persondays: 150.0,
            assets_completed: 0,
            total_expenditure: 0.0,
            avg_wage_rate: 0.0,
        }];

        let overall = overall_summary(&summaries);
        assert_eq!(overall.women_participation_percent, 150.0);
    }

    #[test]
    fn test_detail_summary_snapshot_vs_longitudinal() {
        let mut april = record("Alpha", "X", "April");
        april.average_wage_rate_per_day_per_person = Some(200.0);
        april.total_exp = Some(1.0);
        let mut may = record("Alpha", "X", "May");
        may.average_wage_rate_per_day_per_person = Some(220.0);
        may.total_exp = Some(2.0);
        may.wages = Some(1.5);
        may.number_of_completed_works = Some(4);
        may.number_of_ongoing_works = Some(6);

        let summary = district_detail_summary(&[april, may]).unwrap();
        // Cumulative snapshot from May, not April + May.
        assert_eq!(summary.total_expenditure, 200_000.0);
        assert_eq!(summary.total_wages, 150_000.0);
        assert_eq!(summary.total_completed_works, 4);
        assert_eq!(summary.total_ongoing_works, 6);
        // Longitudinal mean across both months.
        assert_eq!(summary.average_wage_rate, 210.0);
    }

    #[test]
    fn test_detail_summary_empty_input() {
        assert!(district_detail_summary(&[]).is_none());
    }
}
