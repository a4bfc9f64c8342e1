use crate::record::DrawRecord;
use crate::trends::types::ScalarPoint;

/// One `(date, CRS cut-off)` point per round that has a usable score.
///
/// Rounds held on the same date stay separate points. Order follows the
/// input, so callers pass records from
/// [`sort_chronologically`](crate::trends::sort_chronologically).
pub fn build_crs_trend(records: &[DrawRecord]) -> Vec<ScalarPoint> {
    records
        .iter()
        .filter_map(|r| {
            r.crs_score.map(|score| ScalarPoint {
                date: r.draw_date,
                round: Some(r.round_number),
                series: Some(r.category.to_string()),
                value: score,
            })
        })
        .collect()
}
