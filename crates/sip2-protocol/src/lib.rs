//! SIP2 message schema and framer: lays typed field values onto (and reads
//! them back off) the wire format, on top of the primitive field codec in
//! `sip2-field`.

mod checksum;
mod envelope;
mod framer;
mod lang;
mod messages;

pub use checksum::{ChecksumError, compute as compute_checksum, verify as verify_checksum};
pub use envelope::{
    EnvelopeError, ErrorBody, ErrorEnvelope, RequestEnvelope, RequestHeader, ResponseHeader, SuccessEnvelope,
    values_from_json, values_to_json,
};
pub use framer::{FrameError, MessageValues, decode_response, encode_request};
pub use lang::{Currency, Language};
pub use messages::{
    ACS_RESEND_COMMAND_ID, MessageSchema, REQUEST_SCHEMAS, RESPONSE_SCHEMAS, request_schema_by_method,
    response_schema_by_command_id,
};

pub use sip2_field::{FieldError, FieldKind, FieldSpec, FieldValue};
