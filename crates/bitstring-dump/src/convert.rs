use bitstring::{Record, Value};
use serde_json::{Map, Value as JsonValue};

/// Converts a populated record into a JSON object, keeping field order.
///
/// Numbers stay numbers. Byte fields become arrays, or with `text` set,
/// strings cut at the first NUL and decoded lossily as UTF-8.
pub fn record_to_json(record: &Record, text: bool) -> JsonValue {
    let map: Map<String, JsonValue> = record
        .iter()
        .map(|(name, value)| (name.to_string(), value_to_json(value, text)))
        .collect();

    JsonValue::Object(map)
}

fn value_to_json(value: &Value, text: bool) -> JsonValue {
    match value {
        Value::Bytes(bytes) if text => JsonValue::String(bytes_to_text(bytes)),
        Value::Bytes(bytes) => JsonValue::from(bytes.clone()),
        other => other.as_u64().map_or(JsonValue::Null, JsonValue::from),
    }
}

fn bytes_to_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
