//! JSON envelope shapes for the HTTP surface, and the glue between
//! [`crate::framer::MessageValues`] (keyed by field name, typed per
//! [`sip2_field::FieldValue`]) and the `serde_json::Value` a handler
//! actually reads and writes.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sip2_field::{FieldError, FieldSpec, FieldValue};

use crate::framer::MessageValues;
use crate::lang::{Currency, Language};

const TIMESTAMP_JSON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    pub header: RequestHeader,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestHeader {
    pub method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub header: ResponseHeader,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub header: ResponseHeader,
    pub data: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseHeader {
    pub version: &'static str,
}

impl ResponseHeader {
    pub const CURRENT: ResponseHeader = ResponseHeader { version: "2.0" };
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub msg: String,
    pub code: &'static str,
}

impl ErrorEnvelope {
    pub fn new(code: &'static str, msg: impl Into<String>) -> Self {
        ErrorEnvelope { header: ResponseHeader::CURRENT, data: ErrorBody { msg: msg.into(), code } }
    }
}

impl SuccessEnvelope {
    pub fn new(data: Value) -> Self {
        SuccessEnvelope { header: ResponseHeader::CURRENT, data }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("missing required JSON field {0:?}")]
    MissingField(&'static str),
    #[error("JSON field {field:?} has the wrong type for wire kind {kind:?}")]
    WrongType { field: &'static str, kind: sip2_field::FieldKind },
    #[error("JSON field {field:?}: invalid timestamp {literal:?} (expected {TIMESTAMP_JSON_FORMAT:?})")]
    BadTimestamp { field: &'static str, literal: String },
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Build [`MessageValues`] from a JSON object for the fields a request
/// schema declares. Fields absent from `json` are simply omitted — whether
/// that's fatal is decided later, by [`crate::framer::encode_request`]'s
/// `MissingField` check.
pub fn values_from_json(fields: &'static [FieldSpec], json: &Map<String, Value>) -> Result<MessageValues, EnvelopeError> {
    let mut values = MessageValues::new();
    for field in fields {
        let Some(raw) = json.get(field.name) else { continue };
        let value = match field.kind {
            sip2_field::FieldKind::Text if field.name == "currency_type" => raw
                .as_str()
                .map(|s| FieldValue::Text(Currency::normalize(s)))
                .ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?,
            sip2_field::FieldKind::Text => raw
                .as_str()
                .map(|s| FieldValue::Text(s.to_owned()))
                .ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?,
            sip2_field::FieldKind::Integer if field.name == "language_id" => decode_language(field, raw)?,
            sip2_field::FieldKind::Integer => raw
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?,
            sip2_field::FieldKind::Float => raw
                .as_f64()
                .map(FieldValue::Float)
                .ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?,
            sip2_field::FieldKind::Boolean => raw
                .as_bool()
                .map(FieldValue::Boolean)
                .ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?,
            sip2_field::FieldKind::Timestamp => {
                let literal = raw.as_str().ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?;
                let parsed = NaiveDateTime::parse_from_str(literal, TIMESTAMP_JSON_FORMAT)
                    .map_err(|_| EnvelopeError::BadTimestamp { field: field.name, literal: literal.to_owned() })?;
                FieldValue::Timestamp(parsed)
            }
            sip2_field::FieldKind::TextList => {
                let items = raw.as_array().ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?;
                let items = items
                    .iter()
                    .map(|v| v.as_str().map(str::to_owned))
                    .collect::<Option<Vec<_>>>()
                    .ok_or(EnvelopeError::WrongType { field: field.name, kind: field.kind })?;
                FieldValue::TextList(items)
            }
        };
        values.insert(field.name, value);
    }
    Ok(values)
}

/// Accepts `language_id` as either a bare wire integer or (for readability)
/// one of [`Language`]'s snake_case names; both resolve to the same
/// `FieldValue::Integer` the wire actually carries.
fn decode_language(field: &FieldSpec, raw: &Value) -> Result<FieldValue, EnvelopeError> {
    if let Some(id) = raw.as_i64() {
        return Ok(FieldValue::Integer(id));
    }
    if let Ok(lang) = serde_json::from_value::<Language>(raw.clone()) {
        return Ok(FieldValue::Integer(lang.wire_id()));
    }
    Err(EnvelopeError::WrongType { field: field.name, kind: field.kind })
}

/// The inverse of [`values_from_json`], used to render a decoded response
/// back out as the envelope's `data` object.
pub fn values_to_json(values: &MessageValues) -> Value {
    let mut map: BTreeMap<&'static str, Value> = BTreeMap::new();
    for (&name, value) in values {
        let json = match (name, value) {
            ("language_id", FieldValue::Integer(id)) => Language::from_wire_id(*id)
                .and_then(|lang| serde_json::to_value(lang).ok())
                .unwrap_or_else(|| Value::Number((*id).into())),
            (_, FieldValue::Text(s)) => Value::String(s.clone()),
            (_, FieldValue::Integer(i)) => Value::Number((*i).into()),
            (_, FieldValue::Float(f)) => serde_json::Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            (_, FieldValue::Boolean(b)) => Value::Bool(*b),
            (_, FieldValue::Timestamp(t)) => Value::String(t.format(TIMESTAMP_JSON_FORMAT).to_string()),
            (_, FieldValue::TextList(items)) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        };
        map.insert(name, json);
    }
    Value::Object(map.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sip2_field::FieldKind;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::fixed("no_block", FieldKind::Boolean, 1),
        FieldSpec::var("AA", "patron_id", FieldKind::Text),
    ];

    #[test]
    fn values_from_json_skips_absent_fields() {
        let json = json!({"patron_id": "p1"}).as_object().unwrap().clone();
        let values = values_from_json(FIELDS, &json).unwrap();
        assert_eq!(values.get("patron_id"), Some(&FieldValue::Text("p1".into())));
        assert!(!values.contains_key("no_block"));
    }

    #[test]
    fn values_to_json_round_trips_through_from_json() {
        let json = json!({"patron_id": "p1", "no_block": true}).as_object().unwrap().clone();
        let values = values_from_json(FIELDS, &json).unwrap();
        let back = values_to_json(&values);
        assert_eq!(back["patron_id"], json!("p1"));
        assert_eq!(back["no_block"], json!(true));
    }

    #[test]
    fn wrong_json_type_is_reported() {
        let json = json!({"no_block": "not-a-bool"}).as_object().unwrap().clone();
        let err = values_from_json(FIELDS, &json).unwrap_err();
        assert!(matches!(err, EnvelopeError::WrongType { field: "no_block", .. }));
    }

    const LANGUAGE_FIELDS: &[FieldSpec] = &[FieldSpec::fixed("language_id", FieldKind::Integer, 3)];

    #[test]
    fn language_id_accepts_a_bare_integer() {
        let json = json!({"language_id": 2}).as_object().unwrap().clone();
        let values = values_from_json(LANGUAGE_FIELDS, &json).unwrap();
        assert_eq!(values["language_id"], FieldValue::Integer(2));
    }

    #[test]
    fn language_id_accepts_a_named_variant() {
        let json = json!({"language_id": "french"}).as_object().unwrap().clone();
        let values = values_from_json(LANGUAGE_FIELDS, &json).unwrap();
        assert_eq!(values["language_id"], FieldValue::Integer(Language::French.wire_id()));
    }

    #[test]
    fn values_to_json_renders_language_id_as_its_name() {
        let values = values_from_json(LANGUAGE_FIELDS, &json!({"language_id": "french"}).as_object().unwrap().clone())
            .unwrap();
        assert_eq!(values_to_json(&values)["language_id"], json!("french"));
    }

    #[test]
    fn currency_type_is_upper_cased_and_trimmed() {
        static FIELDS: &[FieldSpec] = &[FieldSpec::var_fixed("BH", "currency_type", FieldKind::Text, 3)];
        let json = json!({"currency_type": " usd "}).as_object().unwrap().clone();
        let values = values_from_json(FIELDS, &json).unwrap();
        assert_eq!(values["currency_type"], FieldValue::Text("USD".into()));
    }
}
