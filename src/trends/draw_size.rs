use crate::record::DrawRecord;
use crate::trends::types::ScalarPoint;

/// One `(date, invitations)` point per round with a known draw size.
///
/// A size of zero is a real observation and is kept.
pub fn build_draw_size_trend(records: &[DrawRecord]) -> Vec<ScalarPoint> {
    records
        .iter()
        .filter_map(|r| {
            r.draw_size.map(|size| ScalarPoint {
                date: r.draw_date,
                round: Some(r.round_number),
                series: Some(r.category.to_string()),
                value: size,
            })
        })
        .collect()
}
