//! Decoding of `{success, <field>}` lookup responses.

use serde_json::Value;

use crate::error::LookupError;
use crate::stage::LookupStage;

fn payload<'a>(stage: LookupStage, body: &'a Value) -> Result<&'a Value, LookupError> {
    let Some(object) = body.as_object() else {
        return Err(LookupError::malformed(stage, "body is not an object"));
    };
    if !object.get("success").map(truthy).unwrap_or(false) {
        return Err(LookupError::Unsuccessful(stage));
    }
    object
        .get(stage.field())
        .ok_or_else(|| LookupError::malformed(stage, format!("missing '{}'", stage.field())))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Option list for a makes/models/years response.
///
/// Strings are trimmed and empty ones skipped; numbers (years) are kept in
/// their decimal form; anything else is skipped.
pub fn parse_options(stage: LookupStage, body: &Value) -> Result<Vec<String>, LookupError> {
    let Some(items) = payload(stage, body)?.as_array() else {
        return Err(LookupError::malformed(
            stage,
            format!("'{}' is not an array", stage.field()),
        ));
    };
    Ok(items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect())
}

/// Seat row count from a seat rows response.
///
/// A zero count is returned as-is; callers decide the fallback.
pub fn parse_seat_rows(body: &Value) -> Result<u32, LookupError> {
    let stage = LookupStage::SeatRows;
    let count = match payload(stage, body)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Null => Some(0),
        _ => None,
    };
    count
        .map(|c| u32::try_from(c).unwrap_or(u32::MAX))
        .ok_or_else(|| LookupError::malformed(stage, "seat_rows is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_skip_empty() {
        let body = json!({"success": true, "makes": ["Toyota", "", "  ", "Honda"]});
        assert_eq!(
            parse_options(LookupStage::Makes, &body).unwrap(),
            vec!["Toyota", "Honda"]
        );
    }

    #[test]
    fn test_years_may_be_numbers() {
        let body = json!({"success": true, "years": [2021, "2020", null]});
        assert_eq!(
            parse_options(LookupStage::Years, &body).unwrap(),
            vec!["2021", "2020"]
        );
    }

    #[test]
    fn test_unsuccessful() {
        let body = json!({"success": false, "models": ["Camry"]});
        assert!(matches!(
            parse_options(LookupStage::Models, &body),
            Err(LookupError::Unsuccessful(LookupStage::Models))
        ));
    }

    #[test]
    fn test_wrong_shape() {
        let body = json!({"success": true, "models": "Camry"});
        assert!(matches!(
            parse_options(LookupStage::Models, &body),
            Err(LookupError::MalformedResponse { .. })
        ));
        assert!(parse_options(LookupStage::Makes, &json!([1, 2])).is_err());
    }

    #[test]
    fn test_seat_rows() {
        assert_eq!(parse_seat_rows(&json!({"success": true, "seat_rows": 3})).unwrap(), 3);
        assert_eq!(parse_seat_rows(&json!({"success": true, "seat_rows": "2"})).unwrap(), 2);
        assert_eq!(parse_seat_rows(&json!({"success": true, "seat_rows": 0})).unwrap(), 0);
        assert!(matches!(
            parse_seat_rows(&json!({"success": false})),
            Err(LookupError::Unsuccessful(LookupStage::SeatRows))
        ));
        assert!(parse_seat_rows(&json!({"success": true})).is_err());
    }
}
