//! Value Module
//!
//! The scalar kinds the cache accepts for storage.

use std::fmt;

use serde::Serialize;

// == Value ==
/// A scalar passed through to the store unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Value {
    // == Encoding ==
    /// Bytes written to the store for this value.
    ///
    /// Floats use the shortest form that parses back to the same number and
    /// always carry a decimal point or exponent, so `1.0` is not mistaken for
    /// an integer on the way back.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Str(text) => text.as_bytes().to_vec(),
            Value::Bytes(bytes) => bytes.clone(),
            Value::Int(number) => number.to_string().into_bytes(),
            Value::Float(number) => format!("{number:?}").into_bytes(),
        }
    }

    /// Parses a command-line style token: integers and floats are detected,
    /// anything else is kept as text.
    pub fn parse_token(token: &str) -> Self {
        if let Ok(number) = token.parse::<i64>() {
            Value::Int(number)
        } else if let Ok(number) = token.parse::<f64>() {
            Value::Float(number)
        } else {
            Value::Str(token.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => write!(f, "{text:?}"),
            Value::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            Value::Int(number) => write!(f, "{number}"),
            Value::Float(number) => write!(f, "{number:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}
