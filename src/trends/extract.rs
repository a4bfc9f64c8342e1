use serde_json::Value;
use tracing::info;

use crate::error::ExtractionError;
use crate::parser::{parse_document, parse_records, rounds_of};
use crate::record::DrawRecord;
use crate::trends::types::{Extraction, TrendSet};
use crate::trends::{
    build_crs_trend, build_draw_size_trend, build_monthly_draw_summary, build_pool_distribution,
    build_pool_trend,
};

/// Orders rounds by draw date, then by official round number.
pub fn sort_chronologically(mut records: Vec<DrawRecord>) -> Vec<DrawRecord> {
    records.sort_by_key(|r| (r.draw_date, r.round_number));
    records
}

/// Runs every trend pass over a decoded rounds document.
///
/// # Errors
///
/// Fails only when `document` is not a recognisable sequence of rounds.
/// Individual bad entries are reported in [`Extraction::warnings`].
pub fn extract_all(document: &Value) -> Result<Extraction, ExtractionError> {
    let entries = rounds_of(document)?;
    let parsed = parse_records(entries);
    let records = sort_chronologically(parsed.records);

    let trends = TrendSet {
        crs_trend: build_crs_trend(&records),
        pool_trend: build_pool_trend(&records),
        draw_size_trend: build_draw_size_trend(&records),
        pool_distribution: build_pool_distribution(&records),
        monthly_draw_summary: build_monthly_draw_summary(&records),
    };

    info!(
        rounds_read = entries.len(),
        rounds_used = records.len(),
        skipped = parsed.warnings.len(),
        crs_points = trends.crs_trend.len(),
        pool_points = trends.pool_trend.len(),
        draw_size_points = trends.draw_size_trend.len(),
        "Trend extraction complete"
    );

    Ok(Extraction {
        trends,
        warnings: parsed.warnings,
        rounds_read: entries.len(),
        rounds_used: records.len(),
    })
}

/// Decodes raw JSON bytes and runs [`extract_all`].
pub fn extract_from_slice(bytes: &[u8]) -> Result<Extraction, ExtractionError> {
    let document = parse_document(bytes)?;
    extract_all(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::test_support::{date, record};
    use serde_json::json;

    #[test]
    fn test_sort_breaks_ties_by_round() {
        let records = vec![
            record(12, "2023-01-04"),
            record(3, "2023-02-01"),
            record(11, "2023-01-04"),
        ];

        let sorted = sort_chronologically(records);

        let order: Vec<_> = sorted.iter().map(|r| r.round_number).collect();
        assert_eq!(order, vec![11, 12, 3]);
    }

    #[test]
    fn test_extract_all_worked_example() {
        let doc = json!([
            {"round": 1, "date": "2023-01-04", "size": 3500, "crs": 481, "category": "PNP"},
            {"round": 2, "date": "2023-01-04", "size": 1000, "crs": null, "category": "CEC"}
        ]);

        let extraction = extract_all(&doc).unwrap();
        let trends = &extraction.trends;

        assert!(extraction.warnings.is_empty());
        assert_eq!(trends.crs_trend.len(), 1);
        assert_eq!(trends.crs_trend[0].date, date("2023-01-04"));
        assert_eq!(trends.crs_trend[0].value, 481);

        let sizes: Vec<_> = trends.draw_size_trend.iter().map(|p| p.value).collect();
        assert_eq!(sizes, vec![3500, 1000]);
        assert!(trends.draw_size_trend.iter().all(|p| p.date == date("2023-01-04")));

        assert_eq!(trends.pool_trend.len(), 1);
        assert_eq!(trends.pool_trend[0].value.get("PNP"), Some(&1));
        assert_eq!(trends.pool_trend[0].value.get("CEC"), Some(&1));
    }

    #[test]
    fn test_extract_all_rejects_single_object() {
        let doc = json!({"round": 1, "date": "2023-01-04", "size": 3500});
        assert!(extract_all(&doc).is_err());
    }

    #[test]
    fn test_extract_from_slice_rejects_garbage() {
        assert!(matches!(
            extract_from_slice(b"<html>"),
            Err(ExtractionError::Decode(_))
        ));
    }
}
