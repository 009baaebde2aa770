//! Monthly averages of combined side percentages.
//!
//! Buckets strictly by the operation date field. Records without a parseable
//! operation date are skipped; there is no reservation-date fallback and no
//! special casing for in-progress records here.

use std::collections::HashMap;

use crate::calendar::parse_date;
use crate::operation::Operation;

#[derive(Default)]
struct MonthBucket {
    total: f64,
    count: u32,
}

/// Average combined side percentage per month (1-12) of the given year.
/// Months without any dated operation are absent from the map.
pub fn monthly_side_percent_average(ops: &[Operation], year: i32) -> HashMap<u32, f64> {
    use chrono::Datelike;

    let mut buckets: HashMap<u32, MonthBucket> = HashMap::new();

    for op in ops {
        let Some(raw) = op.operation_date.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };
        let Some(date) = parse_date(raw) else {
            continue;
        };
        if date.year() != year {
            continue;
        }

        let bucket = buckets.entry(date.month()).or_default();
        bucket.total += op.combined_side_percent();
        bucket.count += 1;
    }

    buckets
        .into_iter()
        .map(|(month, b)| (month, b.total / b.count as f64))
        .collect()
}
