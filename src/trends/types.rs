//! Data types produced by the trend passes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::RecordValidationWarning;

/// One derived observation on a draw date.
///
/// `round` is set when the point stands for a single round; `series` names
/// the line the point belongs to (a category or CRS band) where that applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint<V> {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub value: V,
}

/// A point carrying a single count or score.
pub type ScalarPoint = TrendPoint<u32>;

/// A point carrying a category → count tally.
pub type BreakdownPoint = TrendPoint<BTreeMap<String, u32>>;

/// Invitations and average pool size for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// First day of the month.
    pub month: NaiveDate,
    pub invitations: u64,
    pub mean_candidates: f64,
}

impl MonthlySummary {
    pub fn label(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}

/// All trend sequences derived from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSet {
    pub crs_trend: Vec<ScalarPoint>,
    pub pool_trend: Vec<BreakdownPoint>,
    pub draw_size_trend: Vec<ScalarPoint>,
    pub pool_distribution: Vec<ScalarPoint>,
    pub monthly_draw_summary: Vec<MonthlySummary>,
}

/// Result of a full extraction pass.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub trends: TrendSet,
    pub warnings: Vec<RecordValidationWarning>,
    pub rounds_read: usize,
    pub rounds_used: usize,
}
