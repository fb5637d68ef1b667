//! The closed scalar value space for bound parameters and driver rows.
//!
//! Every value that can be bound to a placeholder or returned by a driver is
//! one of the [`Value`] variants. Resolving the variant once at construction
//! time keeps runtime type inspection out of the serialization path.

use crate::error::{SqlError, SqlResult};
use chrono::{DateTime, SecondsFormat, Utc};

/// A driver-level scalar value.
///
/// `Array` exists so drivers can hand back collection-typed columns; it is
/// rejected by both the condition serializer and the row decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Signed integer (all widths normalize to i64)
    Int(i64),
    /// Unsigned integer (all widths normalize to u64)
    UInt(u64),
    /// Floating point (f32 widens to f64)
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Text
    Text(String),
    /// Raw byte sequence
    Bytes(Vec<u8>),
    /// Temporal value, formatted as RFC 3339 with nanosecond precision
    Time(DateTime<Utc>),
    /// Driver-native collection other than bytes. Never convertible.
    Array(Vec<Value>),
}

impl Value {
    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Time(_) => "time",
            Value::Array(_) => "array",
        }
    }

    /// Convert to the canonical text representation used by decoded records.
    ///
    /// - integers: base-10
    /// - floats: minimal round-trip decimal notation
    /// - bools: `true` / `false`
    /// - bytes: decoded as UTF-8 text (lossy)
    /// - time: RFC 3339 with nanoseconds
    ///
    /// `Null` and `Array` have no text form and return an
    /// [`SqlError::UnsupportedValue`]; callers are expected to have filtered
    /// out NULL already.
    pub fn to_text(&self) -> SqlResult<String> {
        match self {
            Value::Int(v) => Ok(v.to_string()),
            Value::UInt(v) => Ok(v.to_string()),
            Value::Float(v) => Ok(v.to_string()),
            Value::Bool(v) => Ok(v.to_string()),
            Value::Text(v) => Ok(v.clone()),
            Value::Bytes(v) => Ok(String::from_utf8_lossy(v).into_owned()),
            Value::Time(v) => Ok(v.to_rfc3339_opts(SecondsFormat::Nanos, true)),
            Value::Null | Value::Array(_) => {
                Err(SqlError::unsupported(format!("{} value kind", self.kind())))
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(v as u64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, isize);
impl_from_uint!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn int_to_text() {
        assert_eq!(Value::Int(-42).to_text().unwrap(), "-42");
        assert_eq!(Value::UInt(7).to_text().unwrap(), "7");
    }

    #[test]
    fn float_to_text_minimal() {
        assert_eq!(Value::Float(1.5).to_text().unwrap(), "1.5");
        assert_eq!(Value::Float(3.0).to_text().unwrap(), "3");
    }

    #[test]
    fn bool_to_text() {
        assert_eq!(Value::Bool(true).to_text().unwrap(), "true");
        assert_eq!(Value::Bool(false).to_text().unwrap(), "false");
    }

    #[test]
    fn bytes_to_text_utf8() {
        assert_eq!(Value::Bytes(b"Ann".to_vec()).to_text().unwrap(), "Ann");
    }

    #[test]
    fn time_to_text_rfc3339() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(
            Value::Time(t).to_text().unwrap(),
            "2024-05-01T12:30:00.000000000Z"
        );
    }

    #[test]
    fn array_is_unsupported() {
        let err = Value::Array(vec![Value::Int(1)]).to_text().unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }
}
