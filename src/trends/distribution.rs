use crate::record::{CRS_POOL_RANGES, DrawRecord};
use crate::trends::types::ScalarPoint;

/// Series label for a CRS band, e.g. `"CRS Range: 451-500"`.
pub fn range_label(range: &str) -> String {
    format!("CRS Range: {range}")
}

/// Candidate counts per CRS band for every round that reports a pool
/// breakdown.
///
/// Bands with a zero or missing count produce no point, and rounds whose
/// bands are all empty are skipped entirely. Points keep the input's round
/// order, bands in feed order within a round.
pub fn build_pool_distribution(records: &[DrawRecord]) -> Vec<ScalarPoint> {
    let mut points = Vec::new();

    for r in records.iter().filter(|r| !r.pool_ranges_empty()) {
        for (range, count) in CRS_POOL_RANGES.iter().zip(r.pool_ranges.iter()) {
            let Some(count) = count.filter(|c| *c > 0) else {
                continue;
            };
            points.push(ScalarPoint {
                date: r.draw_date,
                round: Some(r.round_number),
                series: Some(range_label(range)),
                value: count,
            });
        }
    }

    points
}
