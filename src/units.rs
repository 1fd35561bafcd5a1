pub const RUPEES_PER_LAKH: f64 = 100_000.0;
pub const RUPEES_PER_CRORE: f64 = 10_000_000.0;

/// Converts a monetary figure reported in lakhs into rupees. Applies to the
/// expenditure and wage totals; the average wage rate is already in rupees
/// per day and must not be passed through this.
pub fn lakhs_to_rupees(lakhs: f64) -> f64 {
    lakhs * RUPEES_PER_LAKH
}

/// Presentation helper: rupees into crores.
pub fn rupees_to_crores(rupees: f64) -> f64 {
    rupees / RUPEES_PER_CRORE
}
