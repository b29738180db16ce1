//! Supplementary enumerations carried in JSON request/response bodies but
//! absent from the wire field catalogue itself: SIP2's language id (a
//! small integer on the wire, `language_id`) and currency type (a 3-letter
//! code, `currency_type`). Kept here rather than folded into `FieldKind`
//! since they're JSON conveniences, not new wire encodings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Unknown,
    English,
    French,
    German,
    Italian,
    Dutch,
    Swedish,
    Finnish,
    Spanish,
    Danish,
    Portuguese,
    Canadianfrench,
    Norwegian,
    Hebrew,
    Japanese,
    Russian,
    Arabic,
    Polish,
    Greek,
    Chinese,
    Korean,
    NorthAmericanSpanish,
    Tamil,
    Malay,
    UnitedKingdom,
    Icelandic,
    Belgian,
    Taiwanese,
}

impl Language {
    /// The wire's `language_id` is this variant's ordinal position,
    /// matching the original catalogue's `iota`-numbered constants.
    pub fn wire_id(self) -> i64 {
        self as i64
    }

    pub fn from_wire_id(id: i64) -> Option<Self> {
        const ALL: &[Language] = &[
            Language::Unknown, Language::English, Language::French, Language::German,
            Language::Italian, Language::Dutch, Language::Swedish, Language::Finnish,
            Language::Spanish, Language::Danish, Language::Portuguese, Language::Canadianfrench,
            Language::Norwegian, Language::Hebrew, Language::Japanese, Language::Russian,
            Language::Arabic, Language::Polish, Language::Greek, Language::Chinese,
            Language::Korean, Language::NorthAmericanSpanish, Language::Tamil, Language::Malay,
            Language::UnitedKingdom, Language::Icelandic, Language::Belgian, Language::Taiwanese,
        ];
        usize::try_from(id).ok().and_then(|idx| ALL.get(idx).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency(&'static str);

impl Currency {
    pub const USD: Currency = Currency("USD");
    pub const CAD: Currency = Currency("CAD");
    pub const GBP: Currency = Currency("GBP");
    pub const FRF: Currency = Currency("FRF");
    pub const DEM: Currency = Currency("DEM");
    pub const ITL: Currency = Currency("ITL");
    pub const ESP: Currency = Currency("ESP");
    pub const JPY: Currency = Currency("JPY");

    pub fn code(self) -> &'static str {
        self.0
    }

    /// Normalize a wire-bound currency code before it's encoded: trimmed
    /// and upper-cased. The original never validates `currency_type`, so
    /// this never rejects input — it only canonicalizes case the way the
    /// eight named constants above are already spelled.
    pub fn normalize(code: &str) -> String {
        code.trim().to_ascii_uppercase()
    }
}
