//! Field values.

use crate::reflect::record::Record;
use std::cmp::Ordering;
use std::fmt;

/// A named enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    name: String,
    number: i32,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> i32 {
        self.number
    }
}

/// The value of a field, or of one element of a repeated field.
///
/// Equality is structural; floats compare by bit pattern, so `NaN` equals
/// itself and `-0.0` differs from `0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Enum(EnumValue),
    Message(Record),
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I32(_) => "int32",
            Value::I64(_) => "int64",
            Value::U32(_) => "uint32",
            Value::U64(_) => "uint64",
            Value::F32(_) => "float",
            Value::F64(_) => "double",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Message(_) => "message",
            Value::List(_) => "list",
        }
    }

    pub fn as_message(&self) -> Option<&Record> {
        match self {
            Value::Message(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Consume a list value into its elements; any other value becomes a
    /// one-element list.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }

    /// Natural ordering between two values of the same primitive kind,
    /// falling back to comparing the rendered text otherwise.
    ///
    /// Enum constants order by their declared number, not by name.
    pub fn compare(&self, other: &Value) -> Ordering {
        let natural = match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::I32(a), Value::I32(b)) => Some(a.cmp(b)),
            (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
            (Value::U32(a), Value::U32(b)) => Some(a.cmp(b)),
            (Value::U64(a), Value::U64(b)) => Some(a.cmp(b)),
            (Value::F32(a), Value::F32(b)) => a.partial_cmp(b),
            (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Value::Enum(b)) => Some(a.number.cmp(&b.number)),
            _ => None,
        };
        natural.unwrap_or_else(|| self.to_string().cmp(&other.to_string()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Message(a), Value::Message(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
            Value::Bytes(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Value::Enum(v) => f.write_str(v.name()),
            Value::Message(record) => write!(f, "{}", record),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    EnumValue => Enum,
    Record => Message,
    Vec<Value> => List,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::from("City name").to_string(), "City name");
        assert_eq!(Value::I32(-4).to_string(), "-4");
        assert_eq!(Value::Bytes(vec![0x0a, 0xff]).to_string(), "0aff");
        assert_eq!(Value::Enum(EnumValue::new("BORROWED", 1)).to_string(), "BORROWED");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::from("b")]).to_string(),
            "[a, b]"
        );
    }

    #[test]
    fn test_natural_ordering() {
        assert_eq!(Value::I32(5).compare(&Value::I32(10)), Ordering::Less);
        assert_eq!(Value::F64(2.5).compare(&Value::F64(-1.0)), Ordering::Greater);
        assert_eq!(
            Value::Enum(EnumValue::new("Z", 0)).compare(&Value::Enum(EnumValue::new("A", 1))),
            Ordering::Less
        );
    }

    #[test]
    fn test_floats_compare_by_bits() {
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
        assert_eq!(Value::F32(f32::NAN), Value::F32(f32::NAN));
        assert_ne!(Value::F64(-0.0), Value::F64(0.0));
        assert_ne!(Value::F32(-0.0), Value::F32(0.0));
        assert_eq!(
            Value::List(vec![Value::F64(f64::NAN)]),
            Value::List(vec![Value::F64(f64::NAN)])
        );
        assert_ne!(Value::I32(1), Value::I64(1));
    }

    #[test]
    fn test_ordering_falls_back_to_text() {
        // NaN has no natural order
        assert_eq!(
            Value::F64(f64::NAN).compare(&Value::F64(1.0)),
            "NaN".cmp("1")
        );
        assert_eq!(Value::I32(9).compare(&Value::from("10")), "9".cmp("10"));
    }
}
