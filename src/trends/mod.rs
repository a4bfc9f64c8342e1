//! Trend projections over validated draw records.
//!
//! Records are sorted once by date and round, then projected into the CRS
//! cut-off trend, the per-date pool composition, the draw-size trend, and the
//! supplementary CRS-band distribution and monthly summary. Every pass is
//! pure: no shared state, so invocations can run concurrently.

pub mod crs;
pub mod distribution;
pub mod draw_size;
pub mod extract;
pub mod monthly;
pub mod pool;
pub mod types;
pub mod utility;

pub use crs::build_crs_trend;
pub use distribution::build_pool_distribution;
pub use draw_size::build_draw_size_trend;
pub use extract::{extract_all, extract_from_slice, sort_chronologically};
pub use monthly::build_monthly_draw_summary;
pub use pool::build_pool_trend;
pub use types::{BreakdownPoint, Extraction, MonthlySummary, ScalarPoint, TrendPoint, TrendSet};

#[cfg(test)]
pub(crate) mod test_support;
