//! Decoding of the published rounds document into validated [`DrawRecord`]s.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::error::{ExtractionError, RecordValidationWarning, SkipReason, json_kind};
use crate::record::DrawRecord;

/// Successfully parsed rounds plus the reasons any entries were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<DrawRecord>,
    pub warnings: Vec<RecordValidationWarning>,
}

/// Decodes a raw JSON document from bytes.
///
/// # Errors
///
/// Returns [`ExtractionError::Decode`] if the bytes are not valid JSON.
pub fn parse_document(bytes: &[u8]) -> Result<Value, ExtractionError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Locates the sequence of round entries in a decoded document.
///
/// Accepts either a bare array or an object carrying a `rounds` array.
pub fn rounds_of(document: &Value) -> Result<&[Value], ExtractionError> {
    match document {
        Value::Array(entries) => Ok(entries),
        Value::Object(obj) => match obj.get("rounds") {
            Some(Value::Array(entries)) => Ok(entries),
            Some(other) => Err(ExtractionError::RoundsNotArray {
                found: json_kind(other),
            }),
            None => Err(ExtractionError::MissingRounds),
        },
        other => Err(ExtractionError::UnexpectedShape {
            found: json_kind(other),
        }),
    }
}

/// Validates every entry, keeping the good ones and recording why the rest
/// were skipped. A repeated round number keeps its first occurrence.
pub fn parse_records(entries: &[Value]) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();
    let mut seen_rounds = HashSet::new();

    for (idx, entry) in entries.iter().enumerate() {
        let result = DrawRecord::from_value(idx + 1, entry).and_then(|record| {
            if seen_rounds.insert(record.round_number) {
                Ok(record)
            } else {
                Err(RecordValidationWarning {
                    record: idx + 1,
                    round: Some(record.round_number),
                    reason: SkipReason::DuplicateRound(record.round_number),
                })
            }
        });

        match result {
            Ok(record) => parsed.records.push(record),
            Err(warning) => {
                warn!(record = warning.record, round = ?warning.round, reason = %warning.reason, "Skipping draw record");
                parsed.warnings.push(warning);
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document_invalid_json() {
        let result = parse_document(b"{not json");
        assert!(matches!(result, Err(ExtractionError::Decode(_))));
    }

    #[test]
    fn test_rounds_of_bare_array() {
        let doc = json!([{"round": 1}]);
        assert_eq!(rounds_of(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_rounds_of_wrapped_object() {
        let doc = json!({"classes": [], "rounds": [{"round": 1}, {"round": 2}]});
        assert_eq!(rounds_of(&doc).unwrap().len(), 2);
    }

    #[test]
    fn test_rounds_of_single_record_object() {
        let doc = json!({"round": 1, "date": "2023-01-04"});
        assert!(matches!(rounds_of(&doc), Err(ExtractionError::MissingRounds)));
    }

    #[test]
    fn test_rounds_of_rounds_not_array() {
        let doc = json!({"rounds": "none"});
        assert!(matches!(
            rounds_of(&doc),
            Err(ExtractionError::RoundsNotArray { found: "a string" })
        ));
    }

    #[test]
    fn test_rounds_of_scalar() {
        assert!(matches!(
            rounds_of(&json!(42)),
            Err(ExtractionError::UnexpectedShape { found: "a number" })
        ));
    }

    #[test]
    fn test_parse_records_skips_bad_entries() {
        let entries = vec![
            json!({"round": 1, "date": "2023-01-04"}),
            json!({"round": 2, "date": "bogus"}),
            json!(null),
            json!({"round": 4, "date": "2023-01-18"}),
        ];

        let parsed = parse_records(&entries);

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.warnings.len(), 2);
        assert_eq!(parsed.warnings[0].record, 2);
        assert_eq!(parsed.warnings[1].record, 3);
    }

    #[test]
    fn test_parse_records_duplicate_round() {
        let entries = vec![
            json!({"round": 7, "date": "2023-01-04", "size": 100}),
            json!({"round": 7, "date": "2023-01-05", "size": 200}),
        ];

        let parsed = parse_records(&entries);

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].draw_size, Some(100));
        assert_eq!(parsed.warnings[0].reason, SkipReason::DuplicateRound(7));
        assert_eq!(parsed.warnings[0].record, 2);
    }
}
