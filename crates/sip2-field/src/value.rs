use chrono::NaiveDateTime;
use std::io::Read;

/// SIP2's fixed timestamp format: `YYYYMMDD` then four spaces then `HHMMSS`.
const TIMESTAMP_WIRE_FORMAT: &str = "%Y%m%d    %H%M%S";
const TIMESTAMP_WIRE_WIDTH: usize = 18;
const TIMESTAMP_JSON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What shape a field's payload takes, independent of fixed/variable
/// placement. Booleans and timestamps always render/parse the same way no
/// matter where they sit in a message; integers and text vary with their
/// declared width (`None` meaning "read until `|`").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
    TextList,
}

/// Static description of one field slot in a message schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Two-byte protocol id, or `""` for a positional (fixed) field.
    pub id: &'static str,
    /// JSON-facing name, also used for diagnostics.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Declared width in bytes. `None` means "unbounded, `|`-terminated".
    /// Ignored by kinds that always render the same way (Boolean, Float,
    /// Timestamp, TextList) — see `FieldValue::encode`.
    pub width: Option<usize>,
}

impl FieldSpec {
    pub const fn fixed(name: &'static str, kind: FieldKind, width: usize) -> Self {
        FieldSpec { id: "", name, kind, width: Some(width) }
    }

    pub const fn var(id: &'static str, name: &'static str, kind: FieldKind) -> Self {
        FieldSpec { id, name, kind, width: None }
    }

    pub const fn var_fixed(id: &'static str, name: &'static str, kind: FieldKind, width: usize) -> Self {
        FieldSpec { id, name, kind, width: Some(width) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    TextList(Vec<String>),
}

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("field {name}: expected protocol id {expected:?}, got {actual:?}")]
    IdMismatch { name: &'static str, expected: &'static str, actual: String },
    #[error("field {name}: short read (needed {needed} bytes, got {got})")]
    ShortRead { name: &'static str, needed: usize, got: usize },
    #[error("field {name}: invalid integer literal {literal:?}")]
    BadInteger { name: &'static str, literal: String },
    #[error("field {name}: invalid float literal {literal:?}")]
    BadFloat { name: &'static str, literal: String },
    #[error("field {name}: invalid timestamp {literal:?}")]
    BadTimestamp { name: &'static str, literal: String },
}

impl FieldValue {
    /// Emit this value's wire bytes, including its protocol id (if any) and
    /// its own terminator, per `spec`. Positional fields (`spec.id == ""`)
    /// never append `|`, regardless of kind.
    pub fn encode(&self, spec: &FieldSpec) -> Vec<u8> {
        let mut out = Vec::with_capacity(spec.id.len() + 20);
        out.extend_from_slice(spec.id.as_bytes());
        match (self, spec.kind) {
            (FieldValue::Boolean(b), FieldKind::Boolean) => {
                out.extend_from_slice(if *b { b"Y|" } else { b"N|" });
            }
            (FieldValue::Timestamp(t), FieldKind::Timestamp) => {
                let text = t.format(TIMESTAMP_WIRE_FORMAT).to_string();
                out.extend_from_slice(text.as_bytes());
            }
            (FieldValue::Float(f), FieldKind::Float) => {
                out.extend_from_slice(format!("{f:.6}|").as_bytes());
            }
            (FieldValue::TextList(items), FieldKind::TextList) => {
                out.extend_from_slice(items.join(",").as_bytes());
                out.push(b'|');
            }
            (FieldValue::Integer(i), FieldKind::Integer) => match spec.width {
                Some(width) => out.extend_from_slice(pad_numeric(*i, width).as_bytes()),
                None => out.extend_from_slice(format!("{i}|").as_bytes()),
            },
            (FieldValue::Text(s), FieldKind::Text) => match spec.width {
                Some(width) => out.extend_from_slice(pad_text(s, width).as_bytes()),
                None => {
                    out.extend_from_slice(s.as_bytes());
                    out.push(b'|');
                }
            },
            (value, kind) => {
                // Mismatched value/kind pairing is a programmer error in the
                // schema table, not a runtime condition.
                panic!("field {}: value {value:?} does not match kind {kind:?}", spec.name);
            }
        }
        out
    }

    /// Read this field's bytes out of `reader`, verifying the protocol id
    /// (if `spec.id` is non-empty) before consuming the payload.
    pub fn decode(reader: &mut impl Read, spec: &FieldSpec) -> Result<FieldValue, FieldError> {
        if !spec.id.is_empty() {
            check_id(reader, spec)?;
        }
        match spec.kind {
            FieldKind::Boolean => {
                let bytes = read_n(reader, spec, 2)?;
                Ok(FieldValue::Boolean(bytes[0] == b'Y'))
            }
            FieldKind::Timestamp => {
                let bytes = read_n(reader, spec, TIMESTAMP_WIRE_WIDTH)?;
                let text = String::from_utf8_lossy(&bytes);
                let parsed = NaiveDateTime::parse_from_str(&text, TIMESTAMP_WIRE_FORMAT)
                    .map_err(|_| FieldError::BadTimestamp { name: spec.name, literal: text.into_owned() })?;
                Ok(FieldValue::Timestamp(parsed))
            }
            FieldKind::Float => {
                let text = read_content(reader, spec, spec.width)?;
                text.parse::<f64>()
                    .map(FieldValue::Float)
                    .map_err(|_| FieldError::BadFloat { name: spec.name, literal: text })
            }
            FieldKind::TextList => {
                let text = read_content(reader, spec, spec.width)?;
                Ok(FieldValue::TextList(text.split(',').map(str::to_owned).collect()))
            }
            FieldKind::Integer => {
                let text = read_content(reader, spec, spec.width)?;
                text.trim()
                    .parse::<i64>()
                    .map(FieldValue::Integer)
                    .map_err(|_| FieldError::BadInteger { name: spec.name, literal: text })
            }
            FieldKind::Text => {
                let text = read_content(reader, spec, spec.width)?;
                let text = if spec.width.is_some() { text.trim_start().to_owned() } else { text };
                Ok(FieldValue::Text(text))
            }
        }
    }
}

fn pad_numeric(value: i64, width: usize) -> String {
    format!("{value:0width$}", width = width)
}

fn pad_text(value: &str, width: usize) -> String {
    format!("{value:>width$}", width = width)
}

fn check_id(reader: &mut impl Read, spec: &FieldSpec) -> Result<(), FieldError> {
    let mut buf = vec![0u8; spec.id.len()];
    reader
        .read_exact(&mut buf)
        .map_err(|_| FieldError::ShortRead { name: spec.name, needed: spec.id.len(), got: 0 })?;
    if buf != spec.id.as_bytes() {
        return Err(FieldError::IdMismatch {
            name: spec.name,
            expected: spec.id,
            actual: String::from_utf8_lossy(&buf).into_owned(),
        });
    }
    Ok(())
}

fn read_n(reader: &mut impl Read, spec: &FieldSpec, n: usize) -> Result<Vec<u8>, FieldError> {
    let mut buf = vec![0u8; n];
    reader
        .read_exact(&mut buf)
        .map_err(|_| FieldError::ShortRead { name: spec.name, needed: n, got: 0 })?;
    Ok(buf)
}

/// Fixed width reads exactly `width` bytes; unbounded reads up to (but
/// excluding) the next `|`.
fn read_content(reader: &mut impl Read, spec: &FieldSpec, width: Option<usize>) -> Result<String, FieldError> {
    let bytes = match width {
        Some(width) => read_n(reader, spec, width)?,
        None => {
            let mut buf = Vec::new();
            let mut byte = [0u8; 1];
            loop {
                match reader.read_exact(&mut byte) {
                    Ok(()) if byte[0] == b'|' => break,
                    Ok(()) => buf.push(byte[0]),
                    Err(_) => {
                        return Err(FieldError::ShortRead { name: spec.name, needed: 1, got: 0 });
                    }
                }
            }
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_WIRE_FORMAT).unwrap()
    }

    #[test]
    fn boolean_encodes_with_pipe_even_when_positional() {
        let spec = FieldSpec::fixed("no_block", FieldKind::Boolean, 1);
        let encoded = FieldValue::Boolean(true).encode(&spec);
        assert_eq!(encoded, b"Y|");
    }

    #[test]
    fn boolean_decode_consumes_two_bytes_regardless_of_declared_width() {
        let spec = FieldSpec::fixed("no_block", FieldKind::Boolean, 1);
        let mut cursor = Cursor::new(b"N|REST".to_vec());
        let value = FieldValue::decode(&mut cursor, &spec).unwrap();
        assert_eq!(value, FieldValue::Boolean(false));
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"REST");
    }

    #[test]
    fn integer_fixed_width_zero_pads() {
        let spec = FieldSpec::fixed("language_id", FieldKind::Integer, 3);
        let encoded = FieldValue::Integer(1).encode(&spec);
        assert_eq!(encoded, b"001");
    }

    #[test]
    fn integer_variable_uses_pipe_no_padding() {
        let spec = FieldSpec::var("BP", "start_item", FieldKind::Integer);
        let encoded = FieldValue::Integer(1).encode(&spec);
        assert_eq!(encoded, b"BP1|");
    }

    #[test]
    fn text_fixed_width_space_pads_on_the_left() {
        let spec = FieldSpec::fixed("protocol_version", FieldKind::Text, 4);
        let encoded = FieldValue::Text("2.0".to_owned()).encode(&spec);
        assert_eq!(encoded, b" 2.0");
    }

    #[test]
    fn text_roundtrips_through_fixed_width_padding() {
        let spec = FieldSpec::fixed("protocol_version", FieldKind::Text, 4);
        let value = FieldValue::Text("2.0".to_owned());
        let encoded = value.encode(&spec);
        let decoded = FieldValue::decode(&mut Cursor::new(encoded), &spec).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn variable_text_terminates_with_single_pipe() {
        let spec = FieldSpec::var("AO", "institution_id", FieldKind::Text);
        let encoded = FieldValue::Text("libA".to_owned()).encode(&spec);
        assert_eq!(encoded, b"AOlibA|");
        assert_eq!(encoded.iter().filter(|&&b| b == b'|').count(), 1);
    }

    #[test]
    fn timestamp_roundtrips_exact_wire_format() {
        let spec = FieldSpec::fixed("transaction_date", FieldKind::Timestamp, 18);
        let value = FieldValue::Timestamp(ts("20240101    120000"));
        let encoded = value.encode(&spec);
        assert_eq!(encoded.len(), 18);
        assert_eq!(&encoded[8..12], b"    ");
        let decoded = FieldValue::decode(&mut Cursor::new(encoded), &spec).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn timestamp_with_protocol_id_has_no_trailing_pipe() {
        let spec = FieldSpec::var_fixed("BW", "expiration_date", FieldKind::Timestamp, 18);
        let value = FieldValue::Timestamp(ts("20240115    120000"));
        let encoded = value.encode(&spec);
        assert_eq!(encoded.len(), 2 + 18);
        assert!(!encoded.contains(&b'|'));
    }

    #[test]
    fn float_always_pipe_terminated_with_six_fractional_digits() {
        let spec = FieldSpec::var("BV", "fee_amount", FieldKind::Float);
        let encoded = FieldValue::Float(1.5).encode(&spec);
        assert_eq!(encoded, b"BV1.500000|");
    }

    #[test]
    fn text_list_joins_with_comma() {
        let spec = FieldSpec::var("CH", "item_properties", FieldKind::TextList);
        let encoded = FieldValue::TextList(vec!["a".into(), "b".into()]).encode(&spec);
        assert_eq!(encoded, b"CHa,b|");
        let decoded = FieldValue::decode(&mut Cursor::new(&encoded[2..]), &spec).unwrap();
        assert_eq!(decoded, FieldValue::TextList(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn id_mismatch_is_reported() {
        let spec = FieldSpec::var("AA", "patron_id", FieldKind::Text);
        let mut cursor = Cursor::new(b"ZZfoo|".to_vec());
        let err = FieldValue::decode(&mut cursor, &spec).unwrap_err();
        assert!(matches!(err, FieldError::IdMismatch { .. }));
    }

    #[test]
    fn short_read_is_reported() {
        let spec = FieldSpec::fixed("transaction_date", FieldKind::Timestamp, 18);
        let mut cursor = Cursor::new(b"20240101".to_vec());
        let err = FieldValue::decode(&mut cursor, &spec).unwrap_err();
        assert!(matches!(err, FieldError::ShortRead { .. }));
    }
}
