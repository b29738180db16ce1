//! Whole-message encode/decode: lays a [`MessageSchema`]'s fields onto the
//! wire in declaration order, and parses them back by first peeling off the
//! fixed (positional) fields in their relative order, then splitting the
//! remainder on `|` to match variable fields by protocol id.
//!
//! This mirrors the source implementation's `classifyFields` /
//! `decodeVarFields` pair: a message's field list is partitioned once, not
//! sorted — a fixed field declared after several variable fields (like
//! `fee_type` in `checkout_response`) still decodes immediately after the
//! command id, in its relative fixed-only position.

use std::collections::BTreeMap;
use std::io::Cursor;

use sip2_field::{FieldError, FieldSpec, FieldValue};

use crate::checksum;
use crate::messages::MessageSchema;

/// Decoded or to-be-encoded field values, keyed by [`FieldSpec::name`].
pub type MessageValues = BTreeMap<&'static str, FieldValue>;

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("message too short to contain a command id")]
    MissingCommandId,
    #[error("unknown response command id {0:?}")]
    UnknownCommandId(String),
    #[error("missing required field {0:?} for this message")]
    MissingField(&'static str),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Checksum(#[from] checksum::ChecksumError),
}

/// Split a schema's fields into the ordered fixed sublist and the
/// id-keyed variable map, replicating the source's `classifyFields`.
fn classify(schema: &MessageSchema) -> (Vec<&'static FieldSpec>, BTreeMap<&'static str, &'static FieldSpec>) {
    let mut fixed = Vec::new();
    let mut variable = BTreeMap::new();
    for field in schema.fields {
        if field.id.is_empty() {
            fixed.push(field);
        } else {
            variable.insert(field.id, field);
        }
    }
    (fixed, variable)
}

/// Encode a request: command id, then every field in declaration order
/// (fixed and variable interleaved exactly as the schema lists them),
/// then the `AY0AZ<hex4>\r` checksum trailer.
pub fn encode_request(schema: &MessageSchema, values: &MessageValues) -> Result<Vec<u8>, FrameError> {
    let mut body = Vec::new();
    body.extend_from_slice(schema.command_id.as_bytes());
    for field in schema.fields {
        let value = values.get(field.name).ok_or(FrameError::MissingField(field.name))?;
        body.extend_from_slice(&value.encode(field));
    }
    body.extend_from_slice(b"AY0AZ");
    let sum = checksum::compute(&body);
    body.extend_from_slice(format!("{sum:04X}").as_bytes());
    body.push(b'\r');
    Ok(body)
}

/// Decode a response frame (checksum already verified by the caller — see
/// [`checksum::verify`]) against the schema registered for its command id.
pub fn decode_response(
    bytes: &[u8],
    lookup: impl Fn(&str) -> Option<&'static MessageSchema>,
) -> Result<(&'static MessageSchema, MessageValues), FrameError> {
    if bytes.len() < 2 {
        return Err(FrameError::MissingCommandId);
    }
    let command_id = String::from_utf8_lossy(&bytes[..2]).into_owned();
    let schema = lookup(&command_id).ok_or(FrameError::UnknownCommandId(command_id))?;

    let (fixed, variable) = classify(schema);
    let mut cursor = Cursor::new(&bytes[2..]);
    let mut values = MessageValues::new();

    for field in fixed {
        let value = FieldValue::decode(&mut cursor, field)?;
        values.insert(field.name, value);
    }

    // What's left (up to but excluding the `AY0AZ<hex4>` trailer) is
    // variable fields, each self-delimited by its own id + kind: most are
    // `|`-terminated, but a var_fixed field (e.g. a variable-id timestamp)
    // consumes exactly its declared width with no pipe. Walked
    // sequentially rather than split on `|` up front, since a fixed-width
    // variable field's payload carries no pipe of its own.
    let mut remainder = Vec::new();
    std::io::Read::read_to_end(&mut cursor, &mut remainder).map_err(|_| FieldError::ShortRead {
        name: "<remainder>",
        needed: 0,
        got: 0,
    })?;
    let remainder = strip_trailer(&remainder);
    let mut offset = 0usize;

    while remainder.len() - offset >= 2 {
        let id = &remainder[offset..offset + 2];
        let Some(&field) = variable.get(std::str::from_utf8(id).unwrap_or_default()) else {
            // Unrecognized protocol id: forward-compatibility, per spec —
            // skip past the next `|` (or to the end, if this is the last
            // segment) and keep decoding whatever follows.
            match remainder[offset..].iter().position(|&b| b == b'|') {
                Some(pipe) => offset += pipe + 1,
                None => break,
            }
            continue;
        };
        // `FieldValue::decode` expects the id still in the stream.
        let mut field_cursor = Cursor::new(&remainder[offset..]);
        let value = FieldValue::decode(&mut field_cursor, field)?;
        values.insert(field.name, value);
        offset += usize::try_from(field_cursor.position()).unwrap_or(remainder.len() - offset);
    }

    Ok((schema, values))
}

/// Remove the trailing `AY<seq>AZ<hex4>` sequence-number/checksum fields —
/// they carry no schema-declared field and are consumed separately.
fn strip_trailer(remainder: &[u8]) -> &[u8] {
    if let Some(pos) = find_subslice(remainder, b"AY") {
        &remainder[..pos]
    } else {
        remainder
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{CHECKOUT_RESPONSE, LOGIN_REQUEST, request_schema_by_method, response_schema_by_command_id};
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y%m%d    %H%M%S").unwrap()
    }

    #[test]
    fn login_request_round_trips_through_encode() {
        let schema = request_schema_by_method("login").unwrap();
        let mut values = MessageValues::new();
        values.insert("uid_algorithm", FieldValue::Integer(0));
        values.insert("pwd_algorithm", FieldValue::Integer(0));
        values.insert("login_user_id", FieldValue::Text("scuser".into()));
        values.insert("login_password", FieldValue::Text("scpass".into()));
        values.insert("location_code", FieldValue::Text("branch1".into()));
        let encoded = encode_request(schema, &values).unwrap();
        assert!(encoded.starts_with(b"9300CNscuser|COscpass|CPbranch1|AY0AZ"));
        assert!(encoded.ends_with(b"\r"));
        checksum::verify(&encoded).unwrap();
    }

    #[test]
    fn missing_field_is_reported_before_encoding() {
        let schema = &LOGIN_REQUEST;
        let values = MessageValues::new();
        let err = encode_request(schema, &values).unwrap_err();
        assert!(matches!(err, FrameError::MissingField("uid_algorithm")));
    }

    #[test]
    fn checkout_response_decodes_fixed_width_variable_field_without_pipe() {
        // due_date (`AH`) has a protocol id but no pipe terminator; decode
        // must consume exactly its declared width and resume scanning for
        // the next id immediately afterward.
        let mut body = Vec::new();
        body.extend_from_slice(b"12");
        body.extend_from_slice(b"YNYY");
        body.extend_from_slice(b"20240101    120000");
        body.extend_from_slice(b"01"); // fee_type, fixed, width 2
        body.extend_from_slice(b"AOlib|");
        body.extend_from_slice(b"AApatron1|");
        body.extend_from_slice(b"ABitem1|");
        body.extend_from_slice(b"AJtitle1|");
        body.extend_from_slice(b"AH20240201    120000"); // due_date, var_fixed, no pipe
        body.extend_from_slice(b"CIN|");
        body.extend_from_slice(b"BHUSD");
        body.extend_from_slice(b"BV1.000000|");
        body.extend_from_slice(b"CK001");
        body.extend_from_slice(b"CHa,b|");
        body.extend_from_slice(b"BKtxn1|");
        body.extend_from_slice(b"AFhello|");
        body.extend_from_slice(b"AGline|");
        body.extend_from_slice(b"AY0AZ");
        let sum = checksum::compute(&body);
        body.extend_from_slice(format!("{sum:04X}").as_bytes());
        body.push(b'\r');

        checksum::verify(&body).unwrap();
        let (schema, values) = decode_response(&body, response_schema_by_command_id).unwrap();
        assert_eq!(schema.command_id, CHECKOUT_RESPONSE.command_id);
        assert_eq!(values["ok"], FieldValue::Boolean(true));
        assert_eq!(values["fee_type"], FieldValue::Integer(1));
        assert_eq!(values["transaction_date"], FieldValue::Timestamp(ts("20240101    120000")));
        assert_eq!(values["due_date"], FieldValue::Timestamp(ts("20240201    120000")));
        assert_eq!(values["item_properties"], FieldValue::TextList(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn decode_skips_an_unrecognized_field_id_between_two_known_ones() {
        // `ZZ` is not in any schema's variable field map. Forward
        // compatibility means it's skipped, not fatal, and decoding
        // continues with whatever comes after it.
        let schema = request_schema_by_method("login").unwrap();
        let mut body = Vec::new();
        body.extend_from_slice(b"9300");
        body.extend_from_slice(b"CNscuser|");
        body.extend_from_slice(b"ZZunknown|");
        body.extend_from_slice(b"COscpass|");
        body.extend_from_slice(b"AY0AZ");
        let sum = checksum::compute(&body);
        body.extend_from_slice(format!("{sum:04X}").as_bytes());
        body.push(b'\r');

        let (decoded_schema, values) = decode_response(&body, |id| (id == schema.command_id).then_some(schema)).unwrap();
        assert_eq!(decoded_schema.command_id, schema.command_id);
        assert_eq!(values["login_user_id"], FieldValue::Text("scuser".into()));
        assert_eq!(values["login_password"], FieldValue::Text("scpass".into()));
        assert!(!values.contains_key("location_code"));
    }
}
