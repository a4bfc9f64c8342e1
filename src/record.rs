use std::fmt;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{RecordValidationWarning, SkipReason};

/// Number of per-range candidate counts (`dd1` .. `dd17`) carried by a round.
pub const POOL_RANGE_COUNT: usize = 17;

/// CRS score bands for `dd1` .. `dd17`, in feed order.
pub const CRS_POOL_RANGES: [&str; POOL_RANGE_COUNT] = [
    "601-1200", "501-600", "451-500", "491-500", "481-490", "471-480", "461-470", "451-460",
    "401-450", "441-450", "431-440", "421-430", "411-420", "401-410", "351-400", "301-350",
    "0-300",
];

const ROUND_FIELDS: &[&str] = &["drawNumber", "roundNumber", "round"];
const DATE_FIELDS: &[&str] = &["drawDate", "date"];
const SIZE_FIELDS: &[&str] = &["drawSize", "size"];
const CRS_FIELDS: &[&str] = &["drawCRS", "crsScore", "crs"];
const CATEGORY_FIELDS: &[&str] = &["drawName", "category"];
const POOL_TOTAL_FIELD: &str = "dd18";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y"];

/// Program stream a round was held for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Named(String),
    Unspecified,
}

impl Category {
    pub const UNSPECIFIED_LABEL: &'static str = "unspecified";

    /// Builds a category from a raw draw name, dropping a trailing
    /// parenthesised qualifier such as `"Provincial Nominee Program (PNP)"`.
    pub fn from_draw_name(raw: &str) -> Self {
        let name = match raw.rfind(" (") {
            Some(idx) if idx > 0 => &raw[..idx],
            _ => raw,
        };
        let name = name.trim();
        if name.is_empty() {
            Category::Unspecified
        } else {
            Category::Named(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Named(name) => name,
            Category::Unspecified => Self::UNSPECIFIED_LABEL,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated Express Entry round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub round_number: u32,
    pub draw_date: NaiveDate,
    pub draw_size: Option<u32>,
    pub crs_score: Option<u32>,
    pub category: Category,
    /// Candidate counts per CRS band, aligned with [`CRS_POOL_RANGES`].
    pub pool_ranges: [Option<u32>; POOL_RANGE_COUNT],
    /// Total candidates in the pool at draw time.
    pub pool_total: Option<u32>,
}

impl DrawRecord {
    /// Validates one raw feed entry.
    ///
    /// `record` is the entry's 1-based position, carried into the warning
    /// when the entry has to be skipped. Malformed optional fields are
    /// dropped to `None` rather than rejecting the entry.
    pub fn from_value(record: usize, value: &Value) -> Result<Self, RecordValidationWarning> {
        let reject = |round, reason| RecordValidationWarning {
            record,
            round,
            reason,
        };

        let Some(obj) = value.as_object() else {
            return Err(reject(None, SkipReason::NotAnObject));
        };

        let round_number = match read_count(obj, ROUND_FIELDS) {
            Ok(Some(n)) => n,
            Ok(None) => return Err(reject(None, SkipReason::MissingField("roundNumber"))),
            Err(raw) => {
                return Err(reject(
                    None,
                    SkipReason::InvalidField {
                        field: "roundNumber",
                        value: raw,
                    },
                ));
            }
        };

        let draw_date = match read_date(obj) {
            Ok(Some(date)) => date,
            Ok(None) => {
                return Err(reject(
                    Some(round_number),
                    SkipReason::MissingField("drawDate"),
                ));
            }
            Err(raw) => {
                return Err(reject(
                    Some(round_number),
                    SkipReason::InvalidField {
                        field: "drawDate",
                        value: raw,
                    },
                ));
            }
        };

        let draw_size = optional_count(obj, SIZE_FIELDS, round_number);
        let crs_score = optional_count(obj, CRS_FIELDS, round_number);

        let category = lookup(obj, CATEGORY_FIELDS)
            .and_then(Value::as_str)
            .map(Category::from_draw_name)
            .unwrap_or(Category::Unspecified);

        let mut pool_ranges = [None; POOL_RANGE_COUNT];
        for (i, slot) in pool_ranges.iter_mut().enumerate() {
            let key = format!("dd{}", i + 1);
            *slot = optional_count(obj, &[key.as_str()], round_number);
        }
        let pool_total = optional_count(obj, &[POOL_TOTAL_FIELD], round_number);

        Ok(DrawRecord {
            round_number,
            draw_date,
            draw_size,
            crs_score,
            category,
            pool_ranges,
            pool_total,
        })
    }

    /// `true` when none of the per-range pool counts is a positive number.
    pub fn pool_ranges_empty(&self) -> bool {
        self.pool_ranges.iter().all(|c| c.unwrap_or(0) == 0)
    }
}

/// First alias present with a non-null value.
fn lookup<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|name| obj.get(*name))
        .find(|v| !v.is_null())
}

/// Reads a non-negative integer that may be a JSON number or a string such
/// as `"3,500"`.
///
/// `Ok(None)` when the field is absent, null or blank; `Err` carries the raw
/// value when it is present but unusable.
fn read_count(obj: &Map<String, Value>, aliases: &[&str]) -> Result<Option<u32>, String> {
    let Some(value) = lookup(obj, aliases) else {
        return Ok(None);
    };

    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| value.to_string()),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            cleaned
                .parse::<u32>()
                .map(Some)
                .map_err(|_| value.to_string())
        }
        _ => Err(value.to_string()),
    }
}

fn read_date(obj: &Map<String, Value>) -> Result<Option<NaiveDate>, String> {
    let Some(value) = lookup(obj, DATE_FIELDS) else {
        return Ok(None);
    };
    let Some(raw) = value.as_str() else {
        return Err(value.to_string());
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(Some)
        .ok_or_else(|| value.to_string())
}

fn optional_count(obj: &Map<String, Value>, aliases: &[&str], round: u32) -> Option<u32> {
    match read_count(obj, aliases) {
        Ok(count) => count,
        Err(raw) => {
            debug!(round, field = aliases[0], value = %raw, "Ignoring malformed optional field");
            None
        }
    }
}
