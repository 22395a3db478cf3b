//! Structural validation of the status-endpoint payload.

use sentinel_common::error::PollError;
use sentinel_common::types::HomeworkRecord;

/// Check that the payload has the expected shape and pull out the homework
/// records, preserving server order (most recent first).
///
/// Both `homeworks` and `current_date` must be present; `homeworks` must be a
/// sequence. `current_date`'s type is not checked here — the driver falls
/// back to wall-clock time when it is unusable.
pub fn check_response(payload: &serde_json::Value) -> Result<Vec<HomeworkRecord>, PollError> {
    let object = payload
        .as_object()
        .ok_or_else(|| PollError::Schema("response is not a JSON object".to_string()))?;

    if !object.contains_key("current_date") {
        return Err(PollError::Schema("`current_date` key is absent".to_string()));
    }

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| PollError::Schema("`homeworks` key is absent".to_string()))?;

    let entries = homeworks
        .as_array()
        .ok_or_else(|| PollError::Schema("`homeworks` is not a sequence".to_string()))?;

    // Only the shape is enforced here. A record whose fields are absent or
    // mistyped still comes through (as None) so the formatter can report the
    // precise field-level problem.
    entries
        .iter()
        .map(|entry| {
            let record = entry
                .as_object()
                .ok_or_else(|| PollError::Schema("homework entry is not a mapping".to_string()))?;
            Ok(HomeworkRecord {
                homework_name: field_string(record, "homework_name"),
                status: field_string(record, "status"),
            })
        })
        .collect()
}

fn field_string(
    record: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    record.get(key)?.as_str().map(String::from)
}

/// The server-reported cursor, when it is a usable integer.
pub fn reported_cursor(payload: &serde_json::Value) -> Option<i64> {
    payload.get("current_date")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_well_formed_payload_in_order() {
        let payload = json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "reviewing"},
                {"homework_name": "hw1", "status": "approved"},
            ],
            "current_date": 1000,
        });

        let records = check_response(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].homework_name.as_deref(), Some("hw2"));
        assert_eq!(records[1].homework_name.as_deref(), Some("hw1"));
    }

    #[test]
    fn test_rejects_non_object_payload() {
        let err = check_response(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, PollError::Schema(_)));
    }

    #[test]
    fn test_rejects_missing_homeworks_key() {
        let err = check_response(&json!({"current_date": 1000})).unwrap_err();
        assert!(matches!(err, PollError::Schema(_)));
    }

    #[test]
    fn test_rejects_missing_current_date_key() {
        let err = check_response(&json!({"homeworks": []})).unwrap_err();
        assert!(matches!(err, PollError::Schema(_)));
    }

    #[test]
    fn test_rejects_scalar_homeworks() {
        let payload = json!({"homeworks": "hw1", "current_date": 1000});
        let err = check_response(&payload).unwrap_err();
        assert!(matches!(err, PollError::Schema(_)));
    }

    #[test]
    fn test_rejects_mapping_homeworks() {
        let payload = json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1000});
        let err = check_response(&payload).unwrap_err();
        assert!(matches!(err, PollError::Schema(_)));
    }

    #[test]
    fn test_rejects_non_mapping_entry() {
        let payload = json!({"homeworks": [42], "current_date": 1000});
        let err = check_response(&payload).unwrap_err();
        assert!(matches!(err, PollError::Schema(_)));
    }

    #[test]
    fn test_field_level_problems_are_left_to_the_formatter() {
        let payload = json!({
            "homeworks": [{"homework_name": 7, "status": "approved"}],
            "current_date": 1000,
        });

        let records = check_response(&payload).unwrap();
        assert_eq!(records[0].homework_name, None);
        assert_eq!(records[0].status.as_deref(), Some("approved"));
    }

    #[test]
    fn test_reported_cursor_requires_integer() {
        assert_eq!(
            reported_cursor(&json!({"homeworks": [], "current_date": 2000})),
            Some(2000)
        );
        assert_eq!(
            reported_cursor(&json!({"homeworks": [], "current_date": "2000"})),
            None
        );
        assert_eq!(reported_cursor(&json!({"homeworks": []})), None);
    }
}
