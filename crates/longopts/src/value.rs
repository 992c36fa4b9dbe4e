//! Token decoding for the four value kinds an option can store.

use serde::Serialize;
use std::fmt;

/// The kind of value an option stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Str => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// A token that could not be decoded as the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value '{raw}': {reason}")]
pub struct DecodeError {
    pub kind: ValueKind,
    pub raw: String,
    pub reason: String,
}

impl DecodeError {
    fn new(kind: ValueKind, raw: &str, reason: impl fmt::Display) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Conversion from a raw command-line token.
///
/// Implemented for exactly the types a [`Slot`](crate::Slot) can be bound to.
pub trait Decode: Sized {
    const KIND: ValueKind;

    fn decode(raw: &str) -> Result<Self, DecodeError>;
}

impl Decode for bool {
    const KIND: ValueKind = ValueKind::Bool;

    // Flags take their value from the name that matched, never from a token.
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        Err(DecodeError::new(Self::KIND, raw, "flags do not take a value"))
    }
}

impl Decode for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        raw.parse::<i64>()
            .map_err(|e| DecodeError::new(Self::KIND, raw, e))
    }
}

impl Decode for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        raw.parse::<f64>()
            .map_err(|e| DecodeError::new(Self::KIND, raw, e))
    }
}

impl Decode for String {
    const KIND: ValueKind = ValueKind::Str;

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(raw.to_string())
    }
}

/// Decode `raw` as `kind`.
pub fn decode(kind: ValueKind, raw: &str) -> Result<Value, DecodeError> {
    match kind {
        ValueKind::Bool => bool::decode(raw).map(Value::Bool),
        ValueKind::Int => i64::decode(raw).map(Value::Int),
        ValueKind::Float => f64::decode(raw).map(Value::Float),
        ValueKind::Str => String::decode(raw).map(Value::Str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_accepts_signs_and_rejects_garbage() {
        assert_eq!(decode(ValueKind::Int, "11").unwrap(), Value::Int(11));
        assert_eq!(decode(ValueKind::Int, "-3").unwrap(), Value::Int(-3));
        assert_eq!(decode(ValueKind::Int, "+4").unwrap(), Value::Int(4));

        let err = decode(ValueKind::Int, "twelve").unwrap_err();
        assert_eq!(err.kind, ValueKind::Int);
        assert_eq!(err.raw, "twelve");
        assert!(err.to_string().contains("invalid integer value 'twelve'"));

        assert!(decode(ValueKind::Int, "1.5").is_err());
        assert!(decode(ValueKind::Int, "").is_err());
        assert!(decode(ValueKind::Int, "99999999999999999999").is_err());
    }

    #[test]
    fn float_accepts_exponents() {
        assert_eq!(decode(ValueKind::Float, "2.5").unwrap(), Value::Float(2.5));
        assert_eq!(decode(ValueKind::Float, "1e3").unwrap(), Value::Float(1000.0));
        assert_eq!(decode(ValueKind::Float, "7").unwrap(), Value::Float(7.0));

        let err = decode(ValueKind::Float, "1.2.3").unwrap_err();
        assert_eq!(err.kind, ValueKind::Float);
        assert_eq!(err.raw, "1.2.3");
    }

    #[test]
    fn string_is_verbatim() {
        assert_eq!(
            decode(ValueKind::Str, "--looks-like-a-flag").unwrap(),
            Value::Str("--looks-like-a-flag".to_string())
        );
        assert_eq!(decode(ValueKind::Str, "").unwrap(), Value::Str(String::new()));
    }

    #[test]
    fn bool_never_decodes() {
        let err = decode(ValueKind::Bool, "true").unwrap_err();
        assert_eq!(err.kind, ValueKind::Bool);
        assert!(err.reason.contains("do not take a value"));
    }

    #[test]
    fn value_reports_kind() {
        assert_eq!(Value::Str("x".into()).kind(), ValueKind::Str);
        assert_eq!(Value::Float(0.5).kind(), ValueKind::Float);
        assert_eq!(Value::Int(3).to_string(), "3");
    }
}
