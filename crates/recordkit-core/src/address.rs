//! Canonical field addresses.
//!
//! Every option lookup is keyed by the pair `(EnclosingType, fieldName)`:
//! the last two dot-separated segments of a field path. `"Address.city"`,
//! `"Member.Address.city"` and `"library.Member.Address.city"` all name the
//! same field.

use crate::errors::{RecordKitError, Result};
use crate::reflect::FieldDescriptor;
use std::fmt;
use std::str::FromStr;

/// A field identified by its enclosing type's short name and its own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldAddress {
    type_name: String,
    field_name: String,
}

impl FieldAddress {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }

    /// Canonicalize a short or fully hierarchical field path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` if the path has fewer than two segments
    /// or either of its last two segments is empty.
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = path.rsplit('.');
        match (segments.next(), segments.next()) {
            (Some(field), Some(ty)) if !field.is_empty() && !ty.is_empty() => {
                Ok(Self::new(ty, field))
            }
            _ => Err(RecordKitError::InvalidFieldAddress {
                path: path.to_string(),
            }),
        }
    }

    /// Canonical address of a schema field.
    pub fn of(field: &FieldDescriptor) -> Self {
        let full = field.full_name();
        match full.rsplit_once('.') {
            Some((enclosing, name)) => {
                let ty = enclosing.rsplit('.').next().unwrap_or(enclosing);
                Self::new(ty, name)
            }
            None => Self::new("", full),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Whether `field` is the field this address names.
    pub fn matches(&self, field: &FieldDescriptor) -> bool {
        Self::of(field) == *self
    }
}

impl fmt::Display for FieldAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

impl FromStr for FieldAddress {
    type Err = RecordKitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
