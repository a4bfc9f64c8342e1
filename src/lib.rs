//! Express Entry draw trend extraction.
//!
//! Turns the published rounds document into date-ordered CRS, pool
//! composition and draw-size trends, with thin plumbing for fetching the
//! document, writing plot-ready artifacts, and uploading them to S3.

pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod record;
pub mod schedule;
pub mod trends;
pub mod upload;

pub use error::{ExtractionError, RecordValidationWarning, SkipReason};
pub use record::{Category, DrawRecord};
pub use trends::{Extraction, TrendSet, extract_all, extract_from_slice};
