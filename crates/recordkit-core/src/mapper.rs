//! Value mapper plugin for the diff engine.
//!
//! A mapper transforms a field's raw value before it is compared or shown.
//! With `use_mapped_value` set, mapped values replace the raw ones for
//! equality; otherwise the mapped value is only annotated next to the raw
//! value in the report, as `raw (mapped)`.

use crate::address::FieldAddress;
use crate::errors::Result;
use crate::reflect::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Which input a value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

/// A per-field mapping function.
pub type MapFn = dyn Fn(&Value, Side) -> Value + Send + Sync;

/// Frozen set of field mappings.
#[derive(Clone, Default)]
pub struct ValueMapper {
    mappings: HashMap<FieldAddress, Arc<MapFn>>,
    use_mapped_value: bool,
}

impl ValueMapper {
    pub fn builder() -> ValueMapperBuilder {
        ValueMapperBuilder::default()
    }

    /// Whether mapped values take part in equality.
    pub fn use_mapped_value(&self) -> bool {
        self.use_mapped_value
    }

    pub fn has_mapping(&self, field: &FieldAddress) -> bool {
        self.mappings.contains_key(field)
    }

    /// Map `value` through the function registered for `field`.
    ///
    /// Absent values stay absent; fields without a mapping return the raw
    /// value unchanged.
    pub fn map(&self, field: &FieldAddress, value: Option<&Value>, side: Side) -> Option<Value> {
        let value = value?;
        match self.mappings.get(field) {
            Some(f) => Some(f(value, side)),
            None => Some(value.clone()),
        }
    }
}

impl fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<String> = self.mappings.keys().map(ToString::to_string).collect();
        fields.sort();
        f.debug_struct("ValueMapper")
            .field("fields", &fields)
            .field("use_mapped_value", &self.use_mapped_value)
            .finish()
    }
}

/// Accumulates mappings; `build` canonicalizes the field paths.
#[derive(Default)]
pub struct ValueMapperBuilder {
    mappings: Vec<(String, Arc<MapFn>)>,
    use_mapped_value: bool,
}

impl ValueMapperBuilder {
    /// Register a mapping for the field at `path`; a later mapping for the
    /// same field replaces an earlier one.
    pub fn map<F>(mut self, path: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, Side) -> Value + Send + Sync + 'static,
    {
        self.mappings.push((path.into(), Arc::new(f)));
        self
    }

    pub fn use_mapped_value(mut self, use_mapped_value: bool) -> Self {
        self.use_mapped_value = use_mapped_value;
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for a path with fewer than two segments.
    pub fn build(self) -> Result<ValueMapper> {
        let mut mappings = HashMap::with_capacity(self.mappings.len());
        for (path, f) in self.mappings {
            mappings.insert(FieldAddress::parse(&path)?, f);
        }
        Ok(ValueMapper {
            mappings,
            use_mapped_value: self.use_mapped_value,
        })
    }
}
