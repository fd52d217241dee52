//! Dynamic records: a message type plus one value slot per declared field.

use crate::errors::{RecordKitError, Result};
use crate::reflect::descriptor::{FieldDescriptor, FieldKind, MessageDescriptor, ScalarType};
use crate::reflect::unknown::UnknownFields;
use crate::reflect::value::Value;
use std::fmt;
use std::sync::Arc;

/// An instance of a message type.
///
/// Singular fields are either set or absent; a set field keeps its value even
/// when that value equals the field default. Repeated fields are never absent:
/// reading one yields a (possibly empty) list.
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: Arc<MessageDescriptor>,
    slots: Vec<Option<Value>>,
    unknown: UnknownFields,
}

impl Record {
    /// The zero-value instance of `descriptor`: nothing set, no unknown fields.
    pub fn new(descriptor: Arc<MessageDescriptor>) -> Self {
        let slots = vec![None; descriptor.fields().len()];
        Self {
            descriptor,
            slots,
            unknown: UnknownFields::default(),
        }
    }

    pub fn descriptor(&self) -> &Arc<MessageDescriptor> {
        &self.descriptor
    }

    /// Short type name, e.g. `Address`.
    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn full_name(&self) -> &str {
        self.descriptor.full_name()
    }

    /// Look up a declared field by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the type declares no such field.
    pub fn field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.descriptor
            .field_by_name(name)
            .ok_or_else(|| RecordKitError::UnknownField {
                type_name: self.full_name().to_string(),
                field: name.to_string(),
            })
    }

    /// Whether a singular field is set, or a repeated field is non-empty.
    pub fn has_field(&self, field: &FieldDescriptor) -> bool {
        self.slot(field).is_some_and(Option::is_some)
    }

    /// Current value of `field`.
    ///
    /// Repeated fields always yield `Some(Value::List(..))`; singular fields
    /// yield `None` when unset.
    pub fn get_field(&self, field: &FieldDescriptor) -> Option<Value> {
        match self.slot(field) {
            Some(Some(value)) => Some(value.clone()),
            Some(None) if field.is_repeated() => Some(Value::List(Vec::new())),
            _ => None,
        }
    }

    /// Set `field` to `value` after checking it against the field kind.
    ///
    /// Repeated fields take a `Value::List`; setting an empty list clears
    /// the field.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `field` is not declared by this record's
    /// type, and `InvalidFieldValue` if the value does not fit the field.
    pub fn set_field(&mut self, field: &FieldDescriptor, value: Value) -> Result<()> {
        let index = self.index_of(field)?;
        if field.is_repeated() {
            let items = match value {
                Value::List(items) => items,
                other => return Err(invalid_value(field, "list", &other)),
            };
            for item in &items {
                check_element(field, item)?;
            }
            self.slots[index] = if items.is_empty() {
                None
            } else {
                Some(Value::List(items))
            };
        } else {
            check_element(field, &value)?;
            self.slots[index] = Some(value);
        }
        Ok(())
    }

    /// Reset `field` to absent (singular) or empty (repeated).
    pub fn clear_field(&mut self, field: &FieldDescriptor) {
        if let Some(index) = self.descriptor.field_index(field) {
            self.slots[index] = None;
        }
    }

    /// Append one element to a repeated field.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for an undeclared field, and
    /// `InvalidFieldValue` for a singular field or a mistyped element.
    pub fn push_repeated(&mut self, field: &FieldDescriptor, value: Value) -> Result<()> {
        let index = self.index_of(field)?;
        if !field.is_repeated() {
            return Err(RecordKitError::InvalidFieldValue {
                field: field.full_name().to_string(),
                expected: field.kind().to_string(),
                found: "repeated element".to_string(),
            });
        }
        check_element(field, &value)?;
        match &mut self.slots[index] {
            Some(Value::List(items)) => items.push(value),
            slot => *slot = Some(Value::List(vec![value])),
        }
        Ok(())
    }

    /// Set a field by name.
    ///
    /// # Errors
    ///
    /// See [`Record::field`] and [`Record::set_field`].
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let field = self.field(name)?.clone();
        self.set_field(&field, value.into())
    }

    /// Chaining form of [`Record::set`].
    ///
    /// # Errors
    ///
    /// See [`Record::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Read a field by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the type declares no such field.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        let field = self.field(name)?;
        Ok(self.get_field(field))
    }

    pub fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    pub fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }

    pub fn clear_unknown_fields(&mut self) {
        self.unknown.clear();
    }

    /// Whether this record equals the zero-value instance of its type.
    pub fn is_default(&self) -> bool {
        self.unknown.is_empty() && self.slots.iter().all(Option::is_none)
    }

    fn slot(&self, field: &FieldDescriptor) -> Option<&Option<Value>> {
        self.descriptor
            .field_index(field)
            .map(|index| &self.slots[index])
    }

    fn index_of(&self, field: &FieldDescriptor) -> Result<usize> {
        self.descriptor
            .field_index(field)
            .ok_or_else(|| RecordKitError::UnknownField {
                type_name: self.full_name().to_string(),
                field: field.full_name().to_string(),
            })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        let same_schema = Arc::ptr_eq(&self.descriptor, &other.descriptor)
            || *self.descriptor == *other.descriptor;
        same_schema && self.slots == other.slots && self.unknown == other.unknown
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name())?;
        let mut first = true;
        for (field, slot) in self.descriptor.fields().iter().zip(&self.slots) {
            if let Some(value) = slot {
                let sep = if first { " " } else { ", " };
                write!(f, "{}{}: {}", sep, field.name(), value)?;
                first = false;
            }
        }
        if first {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

fn check_element(field: &FieldDescriptor, value: &Value) -> Result<()> {
    let fits = match (field.kind(), value) {
        (FieldKind::Scalar(ty), v) => scalar_fits(*ty, v),
        (FieldKind::Enum(e), Value::Enum(v)) => e.contains(v),
        (FieldKind::Message(type_name), Value::Message(r)) => r.full_name() == type_name,
        _ => false,
    };
    if fits {
        Ok(())
    } else {
        Err(invalid_value(field, &field.kind().to_string(), value))
    }
}

fn scalar_fits(ty: ScalarType, value: &Value) -> bool {
    matches!(
        (ty, value),
        (ScalarType::Bool, Value::Bool(_))
            | (ScalarType::I32, Value::I32(_))
            | (ScalarType::I64, Value::I64(_))
            | (ScalarType::U32, Value::U32(_))
            | (ScalarType::U64, Value::U64(_))
            | (ScalarType::F32, Value::F32(_))
            | (ScalarType::F64, Value::F64(_))
            | (ScalarType::String, Value::String(_))
            | (ScalarType::Bytes, Value::Bytes(_))
    )
}

fn invalid_value(field: &FieldDescriptor, expected: &str, found: &Value) -> RecordKitError {
    let found = match found {
        Value::Message(r) => format!("message {}", r.full_name()),
        other => other.kind_name().to_string(),
    };
    RecordKitError::InvalidFieldValue {
        field: field.full_name().to_string(),
        expected: expected.to_string(),
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::descriptor::EnumDescriptor;
    use crate::reflect::unknown::UnknownValue;
    use crate::reflect::value::EnumValue;

    fn book() -> Arc<MessageDescriptor> {
        let status = Arc::new(EnumDescriptor::new(
            "library.BookStatus",
            [("AVAILABLE", 0), ("BORROWED", 1)],
        ));
        MessageDescriptor::builder("library.Book")
            .scalar("isbn", ScalarType::String)
            .scalar("copies", ScalarType::I32)
            .enumeration("status", &status)
            .repeated_scalar("tags", ScalarType::String)
            .build()
    }

    #[test]
    fn test_unset_fields_read_as_absent_or_empty() {
        let record = Record::new(book());
        assert_eq!(record.get("isbn").unwrap(), None);
        assert_eq!(record.get("tags").unwrap(), Some(Value::List(vec![])));
        assert!(record.is_default());
    }

    #[test]
    fn test_set_default_value_is_still_present() {
        let record = Record::new(book()).with("copies", 0).unwrap();
        assert_eq!(record.get("copies").unwrap(), Some(Value::I32(0)));
        assert!(!record.is_default());
        assert_ne!(record, Record::new(book()));
    }

    #[test]
    fn test_equality_respects_field_layout() {
        let ab = MessageDescriptor::builder("geo.Pair")
            .scalar("a", ScalarType::I32)
            .scalar("b", ScalarType::I32)
            .build();
        let ba = MessageDescriptor::builder("geo.Pair")
            .scalar("b", ScalarType::I32)
            .scalar("a", ScalarType::I32)
            .build();
        let first = Record::new(ab).with("a", 1).unwrap();
        let second = Record::new(ba).with("b", 1).unwrap();
        assert_ne!(first, second);

        // separately built but identical schemas still compare equal
        let copies = |n: i32| Record::new(book()).with("copies", n).unwrap();
        assert_eq!(copies(2), copies(2));
    }

    #[test]
    fn test_type_checked_set() {
        let mut record = Record::new(book());
        let err = record.set("copies", "three").unwrap_err();
        assert!(matches!(err, RecordKitError::InvalidFieldValue { .. }));

        let err = record
            .set("status", EnumValue::new("LOST", 9))
            .unwrap_err();
        assert!(matches!(err, RecordKitError::InvalidFieldValue { .. }));

        let err = record.set("title", "Dune").unwrap_err();
        assert!(matches!(err, RecordKitError::UnknownField { .. }));
    }

    #[test]
    fn test_repeated_push_and_clear_by_empty_list() {
        let mut record = Record::new(book());
        let tags = record.field("tags").unwrap().clone();
        record.push_repeated(&tags, Value::from("sf")).unwrap();
        record.push_repeated(&tags, Value::from("classic")).unwrap();
        assert_eq!(
            record.get_field(&tags),
            Some(Value::List(vec![Value::from("sf"), Value::from("classic")]))
        );

        record.set_field(&tags, Value::List(vec![])).unwrap();
        assert!(!record.has_field(&tags));
        assert!(record.is_default());
    }

    #[test]
    fn test_unknown_fields_take_part_in_equality() {
        let mut record = Record::new(book());
        record
            .unknown_fields_mut()
            .add(42, UnknownValue::Varint(7));
        assert_ne!(record, Record::new(book()));
        record.clear_unknown_fields();
        assert_eq!(record, Record::new(book()));
    }

    #[test]
    fn test_display_lists_set_fields() {
        let record = Record::new(book())
            .with("isbn", "978-0")
            .unwrap()
            .with("copies", 2)
            .unwrap();
        assert_eq!(record.to_string(), "Book { isbn: 978-0, copies: 2 }");
        assert_eq!(Record::new(book()).to_string(), "Book {}");
    }
}
