use chrono::NaiveDate;

use crate::record::{Category, DrawRecord, POOL_RANGE_COUNT};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A fully populated round in the `No Program Specified` stream.
pub fn record(round: u32, draw_date: &str) -> DrawRecord {
    record_in(round, draw_date, "No Program Specified")
}

pub fn record_in(round: u32, draw_date: &str, category: &str) -> DrawRecord {
    DrawRecord {
        round_number: round,
        draw_date: date(draw_date),
        draw_size: Some(3_000),
        crs_score: Some(490),
        category: Category::Named(category.to_string()),
        pool_ranges: [None; POOL_RANGE_COUNT],
        pool_total: Some(220_000),
    }
}
