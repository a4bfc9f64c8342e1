use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::record::DrawRecord;
use crate::trends::types::BreakdownPoint;

/// Tallies rounds per category for each draw date.
///
/// Rounds without a category land in the `unspecified` bucket, so each
/// point's counts sum to the number of rounds held that day. Output is
/// ascending by date whatever the input order.
pub fn build_pool_trend(records: &[DrawRecord]) -> Vec<BreakdownPoint> {
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<String, u32>> = BTreeMap::new();

    for r in records {
        *by_date
            .entry(r.draw_date)
            .or_default()
            .entry(r.category.to_string())
            .or_default() += 1;
    }

    by_date
        .into_iter()
        .map(|(date, breakdown)| BreakdownPoint {
            date,
            round: None,
            series: None,
            value: breakdown,
        })
        .collect()
}
