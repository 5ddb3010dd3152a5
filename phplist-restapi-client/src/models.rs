use serde::Deserialize;
use serde_json::Value;

/// The uniform response envelope every phpList REST command replies with.
///
/// A body that does not deserialize into one of these variants (malformed
/// JSON, missing or unknown `status`) is treated as invalid by the client.
#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        #[serde(default)]
        data: Option<Value>,
    },
    Error,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    /// Returns the payload of a success envelope, `None` for an error
    /// envelope or a success envelope without a `data` field.
    pub fn into_data(self) -> Option<Value> {
        match self {
            Envelope::Success { data } => data,
            Envelope::Error => None,
        }
    }
}

/// Extracts `data.id`. The API serves ids either as JSON numbers or as
/// numeric strings, so both are accepted; an id of 0 counts as absent.
pub(crate) fn id_field(data: &Value) -> Option<u64> {
    data.get("id")
        .and_then(as_u64_loose)
        .filter(|id| *id != 0)
}

/// Extracts `data.total` for the subscriber count command. Unlike ids,
/// a total of 0 is a legitimate answer.
pub(crate) fn total_field(data: &Value) -> Option<u64> {
    data.get("total").and_then(as_u64_loose)
}

fn as_u64_loose(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_rejects_unknown_status() {
        assert!(serde_json::from_str::<Envelope>(r#"{"status":"pending"}"#).is_err());
        assert!(serde_json::from_str::<Envelope>(r#"{"result":"success"}"#).is_err());
    }

    #[test]
    fn envelope_parses_without_data() {
        let env: Envelope = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(env.is_success());
        assert_eq!(env.into_data(), None);
    }

    #[test]
    fn id_field_accepts_numbers_and_numeric_strings() {
        assert_eq!(id_field(&json!({"id": 33})), Some(33));
        assert_eq!(id_field(&json!({"id": "33"})), Some(33));
        assert_eq!(id_field(&json!({"id": "x"})), None);
        assert_eq!(id_field(&json!({"id": 0})), None);
        assert_eq!(id_field(&json!({})), None);
    }

    #[test]
    fn total_field_allows_zero() {
        assert_eq!(total_field(&json!({"total": 0})), Some(0));
        assert_eq!(total_field(&json!({"total": "4"})), Some(4));
        assert_eq!(total_field(&json!({})), None);
    }
}
