use crate::error::{DashboardError, Result};

/// Checks a financial year label like "2023-2024": two four-digit years,
/// the second exactly one after the first.
pub fn validate_fin_year_label(fin_year: &str) -> Result<()> {
    let invalid = || DashboardError::InvalidFinYear(fin_year.to_string());

    let (start, end) = fin_year.split_once('-').ok_or_else(invalid)?;
    if start.len() != 4 || end.len() != 4 {
        return Err(invalid());
    }

    let start: u32 = start.parse().map_err(|_| invalid())?;
    let end: u32 = end.parse().map_err(|_| invalid())?;
    if end != start + 1 {
        return Err(invalid());
    }

    Ok(())
}

/// Rounds to two decimal places, the precision the dashboard reports rates
/// and percentages at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
