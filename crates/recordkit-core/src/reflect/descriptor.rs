//! Schema descriptors: message types, fields and enums.

use crate::reflect::value::{EnumValue, Value};
use std::fmt;
use std::sync::Arc;

/// Primitive value type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
}

impl ScalarType {
    /// The type-specific default (`false`, `0`, `0.0`, `""`, empty bytes).
    pub fn zero_value(self) -> Value {
        match self {
            ScalarType::Bool => Value::Bool(false),
            ScalarType::I32 => Value::I32(0),
            ScalarType::I64 => Value::I64(0),
            ScalarType::U32 => Value::U32(0),
            ScalarType::U64 => Value::U64(0),
            ScalarType::F32 => Value::F32(0.0),
            ScalarType::F64 => Value::F64(0.0),
            ScalarType::String => Value::String(String::new()),
            ScalarType::Bytes => Value::Bytes(Vec::new()),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Bool => "bool",
            ScalarType::I32 => "int32",
            ScalarType::I64 => "int64",
            ScalarType::U32 => "uint32",
            ScalarType::U64 => "uint64",
            ScalarType::F32 => "float",
            ScalarType::F64 => "double",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// An enum type: named constants, the first of which is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    full_name: String,
    values: Vec<(String, i32)>,
}

impl EnumDescriptor {
    /// Create an enum type from its full name and `(name, number)` constants.
    pub fn new<N: Into<String>>(
        full_name: impl Into<String>,
        values: impl IntoIterator<Item = (N, i32)>,
    ) -> Self {
        let full_name = full_name.into();
        Self {
            name: last_segment(&full_name).to_string(),
            full_name,
            values: values.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Look up a constant by name.
    pub fn value_by_name(&self, name: &str) -> Option<EnumValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(n, v)| EnumValue::new(n.clone(), *v))
    }

    /// Look up a constant by number.
    pub fn value_by_number(&self, number: i32) -> Option<EnumValue> {
        self.values
            .iter()
            .find(|(_, v)| *v == number)
            .map(|(n, v)| EnumValue::new(n.clone(), *v))
    }

    /// The first declared constant.
    pub fn default_value(&self) -> Option<EnumValue> {
        self.values
            .first()
            .map(|(n, v)| EnumValue::new(n.clone(), *v))
    }

    /// Whether `value` is one of this enum's constants.
    pub fn contains(&self, value: &EnumValue) -> bool {
        self.values
            .iter()
            .any(|(n, v)| n == value.name() && *v == value.number())
    }
}

/// The kind of value a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarType),
    Enum(Arc<EnumDescriptor>),
    /// A nested record, referenced by the full name of its type.
    Message(String),
}

impl FieldKind {
    pub fn is_message(&self) -> bool {
        matches!(self, FieldKind::Message(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(t) => write!(f, "{}", t),
            FieldKind::Enum(e) => write!(f, "enum {}", e.full_name()),
            FieldKind::Message(name) => write!(f, "message {}", name),
        }
    }
}

/// Identity and shape of one field on a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    full_name: String,
    number: u32,
    kind: FieldKind,
    repeated: bool,
    declared_default: Option<Value>,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full hierarchical address, e.g. `library.Member.Address.city`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn is_message(&self) -> bool {
        self.kind.is_message()
    }

    /// Declared default of the field.
    ///
    /// Repeated fields default to the empty list; singular message fields
    /// have no default and yield `None`.
    pub fn default_value(&self) -> Option<Value> {
        if self.repeated {
            return Some(Value::List(Vec::new()));
        }
        if let Some(declared) = &self.declared_default {
            return Some(declared.clone());
        }
        match &self.kind {
            FieldKind::Scalar(t) => Some(t.zero_value()),
            FieldKind::Enum(e) => e.default_value().map(Value::Enum),
            FieldKind::Message(_) => None,
        }
    }
}

/// A message type: ordered field list in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    name: String,
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Start describing a message type, e.g. `library.Book`.
    pub fn builder(full_name: impl Into<String>) -> MessageDescriptorBuilder {
        let full_name = full_name.into();
        MessageDescriptorBuilder {
            name: last_segment(&full_name).to_string(),
            full_name,
            fields: Vec::new(),
        }
    }

    /// Short type name, e.g. `Book`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_index(&self, field: &FieldDescriptor) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.full_name == field.full_name)
    }
}

/// Builder for [`MessageDescriptor`]; field numbers follow declaration order.
#[derive(Debug, Clone)]
pub struct MessageDescriptorBuilder {
    name: String,
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptorBuilder {
    fn push(mut self, name: &str, kind: FieldKind, repeated: bool, default: Option<Value>) -> Self {
        let number = self.fields.len() as u32 + 1;
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            full_name: format!("{}.{}", self.full_name, name),
            number,
            kind,
            repeated,
            declared_default: default,
        });
        self
    }

    /// Singular scalar field with the type-specific default.
    pub fn scalar(self, name: &str, ty: ScalarType) -> Self {
        self.push(name, FieldKind::Scalar(ty), false, None)
    }

    /// Singular scalar field with an explicit declared default.
    pub fn scalar_with_default(self, name: &str, ty: ScalarType, default: Value) -> Self {
        self.push(name, FieldKind::Scalar(ty), false, Some(default))
    }

    /// Singular enum field.
    pub fn enumeration(self, name: &str, ty: &Arc<EnumDescriptor>) -> Self {
        self.push(name, FieldKind::Enum(ty.clone()), false, None)
    }

    /// Singular nested message field of type `type_full_name`.
    pub fn message(self, name: &str, type_full_name: &str) -> Self {
        self.push(name, FieldKind::Message(type_full_name.to_string()), false, None)
    }

    /// Repeated scalar field.
    pub fn repeated_scalar(self, name: &str, ty: ScalarType) -> Self {
        self.push(name, FieldKind::Scalar(ty), true, None)
    }

    /// Repeated enum field.
    pub fn repeated_enumeration(self, name: &str, ty: &Arc<EnumDescriptor>) -> Self {
        self.push(name, FieldKind::Enum(ty.clone()), true, None)
    }

    /// Repeated nested message field.
    pub fn repeated_message(self, name: &str, type_full_name: &str) -> Self {
        self.push(name, FieldKind::Message(type_full_name.to_string()), true, None)
    }

    pub fn build(self) -> Arc<MessageDescriptor> {
        Arc::new(MessageDescriptor {
            name: self.name,
            full_name: self.full_name,
            fields: self.fields,
        })
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Arc<EnumDescriptor> {
        Arc::new(EnumDescriptor::new(
            "library.BookStatus",
            [("AVAILABLE", 0), ("BORROWED", 1)],
        ))
    }

    #[test]
    fn test_field_full_names_follow_type() {
        let desc = MessageDescriptor::builder("library.Member.Address")
            .scalar("city", ScalarType::String)
            .build();
        assert_eq!(desc.name(), "Address");
        let city = desc.field_by_name("city").unwrap();
        assert_eq!(city.full_name(), "library.Member.Address.city");
        assert_eq!(city.number(), 1);
    }

    #[test]
    fn test_default_values_by_kind() {
        let status = status();
        let desc = MessageDescriptor::builder("library.Book")
            .scalar("price", ScalarType::I32)
            .scalar_with_default("genre", ScalarType::String, Value::from("fiction"))
            .enumeration("status", &status)
            .message("publisher", "library.Publisher")
            .repeated_scalar("tags", ScalarType::String)
            .build();

        let field = |n: &str| desc.field_by_name(n).unwrap().default_value();
        assert_eq!(field("price"), Some(Value::I32(0)));
        assert_eq!(field("genre"), Some(Value::from("fiction")));
        assert_eq!(field("status"), Some(Value::Enum(EnumValue::new("AVAILABLE", 0))));
        assert_eq!(field("publisher"), None);
        assert_eq!(field("tags"), Some(Value::List(vec![])));
    }

    #[test]
    fn test_enum_lookup() {
        let status = status();
        assert_eq!(status.name(), "BookStatus");
        assert_eq!(status.value_by_name("BORROWED").unwrap().number(), 1);
        assert_eq!(status.value_by_number(0).unwrap().name(), "AVAILABLE");
        assert!(status.value_by_name("LOST").is_none());
        assert!(!status.contains(&EnumValue::new("BORROWED", 7)));
    }
}
