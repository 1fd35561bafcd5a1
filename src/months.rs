use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Month-name ranks for an April-to-March financial year. The keys are the
/// spellings the open-data feed actually emits, abbreviations included.
static MONTH_ORDER: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    HashMap::from([
        ("April", 1),
        ("May", 2),
        ("June", 3),
        ("July", 4),
        ("Aug", 5),
        ("August", 5),
        ("Sep", 6),
        ("Sept", 6),
        ("September", 6),
        ("Oct", 7),
        ("October", 7),
        ("Nov", 8),
        ("November", 8),
        ("Dec", 9),
        ("December", 9),
        ("Jan", 10),
        ("January", 10),
        ("Feb", 11),
        ("February", 11),
        ("March", 12),
    ])
});

/// Rank of a reporting month within the financial year: 1 (April) through
/// 12 (March). Unrecognized spellings rank 0, so any recognized month
/// outranks them.
pub fn month_rank(month: &str) -> u8 {
    MONTH_ORDER.get(month).copied().unwrap_or(0)
}
