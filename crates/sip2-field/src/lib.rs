//! Primitive SIP2 field values: encode/decode between the wire's fixed- and
//! variable-width byte discipline and a small typed value model.
//!
//! A field on the wire is `[id][payload]` where `id` is either empty
//! (fixed/positional field) or a two-byte protocol id (variable field,
//! usually `|`-terminated). This crate only knows about single fields; the
//! ordering of fields into whole messages lives in `sip2-protocol`.

mod value;

pub use value::{FieldError, FieldKind, FieldSpec, FieldValue};
