//! Parsing of the compact record grammar.
//!
//! ```text
//! input  = record ("," record)*
//! record = field (":" field){1,2}
//! ```
//!
//! Two-field records are `label:value`, three-field records are
//! `label:title:description`. For two-field input a bare list of numbers
//! (no colon anywhere) is accepted too and labeled `Item 1`, `Item 2`, ...
//!
//! ```
//! use slidechart::models::RecordShape;
//! use slidechart::parser::parse;
//!
//! let ds = parse("Q1:85, Q2:92", RecordShape::Pair)?;
//! assert_eq!(ds.labels(), vec!["Q1", "Q2"]);
//! let bare = parse("85,92", RecordShape::Pair)?;
//! assert_eq!(bare.labels(), vec!["Item 1", "Item 2"]);
//! # Ok::<(), slidechart::error::DataError>(())
//! ```

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::DataError;
use crate::models::{DataRecord, Dataset, RecordShape};

const RECORD_SEP: char = ',';
const FIELD_SEP: char = ':';

/// Signed decimal with optional fraction, exponent and trailing percent sign.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)(%?)$").expect("valid regex")
});

/// Parse `raw` into records of the given shape.
pub fn parse(raw: &str, shape: RecordShape) -> Result<Dataset, DataError> {
    if raw.trim().is_empty() {
        return Ok(Dataset::default());
    }
    match shape {
        RecordShape::Pair if !raw.contains(FIELD_SEP) => parse_bare_values(raw),
        RecordShape::Pair => parse_pairs(raw),
        RecordShape::Triple => parse_triples(raw),
    }
}

fn parse_bare_values(raw: &str) -> Result<Dataset, DataError> {
    raw.split(RECORD_SEP)
        .enumerate()
        .map(|(i, token)| {
            let value = token.trim();
            if value.is_empty() {
                return Err(malformed(i, token, RecordShape::Pair));
            }
            ensure_numeric(i, value)?;
            Ok(DataRecord::pair(format!("Item {}", i + 1), value))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Dataset::new)
}

fn parse_pairs(raw: &str) -> Result<Dataset, DataError> {
    raw.split(RECORD_SEP)
        .enumerate()
        .map(|(i, record)| {
            let fields: Vec<&str> = record.split(FIELD_SEP).map(str::trim).collect();
            let [label, value] = fields[..] else {
                return Err(malformed(i, record, RecordShape::Pair));
            };
            ensure_numeric(i, value)?;
            Ok(DataRecord::pair(label, value))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Dataset::new)
}

fn parse_triples(raw: &str) -> Result<Dataset, DataError> {
    raw.split(RECORD_SEP)
        .enumerate()
        .map(|(i, record)| {
            // Colons after the second separator belong to the description.
            let fields: Vec<&str> = record
                .splitn(RecordShape::Triple.field_count(), FIELD_SEP)
                .map(str::trim)
                .collect();
            let [primary, title, description] = fields[..] else {
                return Err(malformed(i, record, RecordShape::Triple));
            };
            Ok(DataRecord::triple(primary, title, description))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Dataset::new)
}

fn malformed(index: usize, record: &str, shape: RecordShape) -> DataError {
    DataError::MalformedRecord {
        index,
        record: record.trim().to_string(),
        expected: match shape {
            RecordShape::Pair => "label:value",
            RecordShape::Triple => "label:title:description",
        },
    }
}

fn ensure_numeric(index: usize, field: &str) -> Result<f64, DataError> {
    parse_number(field).ok_or_else(|| DataError::NotNumeric {
        index,
        field: field.to_string(),
    })
}

/// Parse a numeric field. Returns `None` for anything that is not a plain
/// finite decimal (an optional trailing `%` is allowed and ignored).
pub fn parse_number(field: &str) -> Option<f64> {
    let caps = NUMBER.captures(field.trim())?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// A numeric value together with the text it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueText {
    pub value: f64,
    pub source: String,
}

impl ValueText {
    pub fn from_field(field: &str, index: usize) -> Result<Self, DataError> {
        let source = field.trim();
        let value = ensure_numeric(index, source)?;
        Ok(Self {
            value,
            source: source.to_string(),
        })
    }

    /// The user wrote an explicit sign or percent marker.
    pub fn is_marked(&self) -> bool {
        self.source.starts_with(['+', '-']) || self.source.ends_with('%')
    }

    /// Display label: verbatim when marked, otherwise rounded to an integer.
    pub fn label(&self) -> String {
        if self.is_marked() {
            self.source.clone()
        } else {
            format_rounded(self.value)
        }
    }

    /// Like [`ValueText::label`] but unmarked values get an explicit sign.
    pub fn signed_label(&self) -> String {
        if self.is_marked() {
            self.source.clone()
        } else {
            format_signed(self.value)
        }
    }
}

/// Round to the nearest integer for display; never prints `-0`.
pub fn format_rounded(v: f64) -> String {
    let r = v.round();
    if r == 0.0 {
        "0".to_string()
    } else {
        format!("{r:.0}")
    }
}

pub fn format_signed(v: f64) -> String {
    let r = v.round();
    if r == 0.0 {
        "+0".to_string()
    } else {
        format!("{r:+.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_sign_fraction_exponent_percent() {
        assert_eq!(parse_number("85"), Some(85.0));
        assert_eq!(parse_number(" +35 "), Some(35.0));
        assert_eq!(parse_number("-8"), Some(-8.0));
        assert_eq!(parse_number("12.5%"), Some(12.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn numbers_never_coerce() {
        for bad in ["", "+", "-", "abc", "1_000", "inf", "NaN", "1.2.3", "++1", "10 20", "%"] {
            assert_eq!(parse_number(bad), None, "{bad:?} should be rejected");
        }
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn labels_follow_marker_rule() {
        let plain = ValueText::from_field("127.4", 0).unwrap();
        assert!(!plain.is_marked());
        assert_eq!(plain.label(), "127");
        assert_eq!(plain.signed_label(), "+127");

        let signed = ValueText::from_field("+35", 0).unwrap();
        assert_eq!(signed.label(), "+35");
        let pct = ValueText::from_field("45.0%", 0).unwrap();
        assert_eq!(pct.label(), "45.0%");
    }

    #[test]
    fn rounding_never_prints_negative_zero() {
        assert_eq!(format_rounded(-0.2), "0");
        assert_eq!(format_signed(-0.2), "+0");
        assert_eq!(format_signed(-7.6), "-8");
    }
}
