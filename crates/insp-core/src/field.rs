//! # Field Values
//!
//! A checklist field holds at most one [`FieldValue`] and, for pass-flags,
//! an optional free-text comment. [`FieldSet`] is the storage shape shared
//! by the inspection's own fields and by every section instance.
//!
//! There is no null variant: a field that has not been assessed is simply
//! absent from the set. Completeness is therefore "is the key present".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The value variants a field can hold.
///
/// Deserialization goes through `WireValue`: a JSON integer becomes
/// `Integer`, a JSON float becomes `Number`, and every string stays `Text`
/// exactly as written. A date is only recognised when
/// [`FieldValue::coerce_to`] is asked for [`ValueKind::Date`], so a serial
/// number that happens to look like a date is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "WireValue")]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

/// Untagged JSON shape of a stored value. Has no date variant.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl From<WireValue> for FieldValue {
    fn from(v: WireValue) -> Self {
        match v {
            WireValue::Bool(b) => Self::Bool(b),
            WireValue::Integer(i) => Self::Integer(i),
            WireValue::Number(n) => Self::Number(n),
            WireValue::Text(t) => Self::Text(t),
        }
    }
}

/// The declared kind of a field, used to validate writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Number,
    Integer,
    Bool,
    Text,
    Date,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldValue {
    /// The kind this value currently carries.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Number(_) => ValueKind::Number,
            Self::Date(_) => ValueKind::Date,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Convert this value to the declared `kind` when the conversion is
    /// lossless. Returns `None` when the value cannot represent that kind.
    ///
    /// Accepted widenings: integer → number, date → text, a whole
    /// number → integer, and text in canonical `YYYY-MM-DD` form → date.
    pub fn coerce_to(&self, kind: ValueKind) -> Option<FieldValue> {
        match (self, kind) {
            (v, k) if v.kind() == k => Some(v.clone()),
            (Self::Integer(i), ValueKind::Number) => Some(Self::Number(*i as f64)),
            (Self::Number(n), ValueKind::Integer)
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 =>
            {
                Some(Self::Integer(*n as i64))
            }
            (Self::Date(d), ValueKind::Text) => Some(Self::Text(d.to_string())),
            (Self::Text(t), ValueKind::Date) => parse_canonical_date(t).map(Self::Date),
            _ => None,
        }
    }

    /// Numeric view of the value (integers widen to `f64`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean view of the value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// `YYYY-MM-DD` only. Anything chrono would re-render differently (missing
/// padding, a sign, surrounding text) is rejected.
fn parse_canonical_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .filter(|d| d.to_string() == text)
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

/// Values and comments of one section (or of the inspection itself).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    /// Field id → value. Absent key means null.
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
    /// Field id → comment. Comments share the id of the field they annotate.
    #[serde(default)]
    pub comments: BTreeMap<String, String>,
}

impl FieldSet {
    /// An empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `field`, if set.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// The numeric value of `field`, if set and numeric.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }

    /// The integer value of `field`, if set and integral.
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_i64)
    }

    /// The boolean value of `field`, if set and boolean.
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    /// The comment attached to `field`, if any.
    pub fn comment(&self, field: &str) -> Option<&str> {
        self.comments.get(field).map(String::as_str)
    }

    /// Whether `field` holds a value.
    pub fn has(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Set `field` to `value`, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(field.into(), value.into())
    }

    /// Attach a comment to `field`.
    pub fn set_comment(&mut self, field: impl Into<String>, comment: impl Into<String>) {
        self.comments.insert(field.into(), comment.into());
    }

    /// Clear the value of `field`.
    pub fn clear(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// Remove the comment on `field`.
    pub fn clear_comment(&mut self, field: &str) -> Option<String> {
        self.comments.remove(field)
    }

    /// No values and no comments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.comments.is_empty()
    }
}
