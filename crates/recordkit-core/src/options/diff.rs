use super::{canonical_key_map, canonical_set};
use crate::address::FieldAddress;
use crate::errors::Result;
use crate::mapper::ValueMapper;
use crate::reflect::MessageDescriptor;
use std::collections::{HashMap, HashSet};

/// Frozen configuration for [`diff`](crate::diff::diff).
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    key_fields: HashMap<String, FieldAddress>,
    correlate_by: HashMap<FieldAddress, Option<FieldAddress>>,
    excluded: HashSet<FieldAddress>,
    redacted: HashSet<FieldAddress>,
    mapper: Option<ValueMapper>,
}

impl DiffOptions {
    pub fn builder() -> DiffOptionsBuilder {
        DiffOptionsBuilder::default()
    }

    /// Field whose value labels instances of `descriptor` in the report.
    ///
    /// Looked up by the type's full name first, then its short name.
    pub fn key_field(&self, descriptor: &MessageDescriptor) -> Option<&FieldAddress> {
        self.key_fields
            .get(descriptor.full_name())
            .or_else(|| self.key_fields.get(descriptor.name()))
    }

    /// Whether the repeated field is aligned before comparison.
    pub fn is_correlated(&self, field: &FieldAddress) -> bool {
        self.correlate_by.contains_key(field)
    }

    /// Key field used to align elements of a correlated repeated field.
    pub fn correlation_key(&self, field: &FieldAddress) -> Option<&FieldAddress> {
        self.correlate_by.get(field).and_then(Option::as_ref)
    }

    pub fn is_excluded(&self, field: &FieldAddress) -> bool {
        self.excluded.contains(field)
    }

    pub fn is_redacted(&self, field: &FieldAddress) -> bool {
        self.redacted.contains(field)
    }

    pub fn mapper(&self) -> Option<&ValueMapper> {
        self.mapper.as_ref()
    }
}

/// Builder for [`DiffOptions`].
#[derive(Debug, Default)]
pub struct DiffOptionsBuilder {
    key_fields: Vec<(String, String)>,
    correlate_by: Vec<(String, Option<String>)>,
    excluded: Vec<String>,
    redacted: Vec<String>,
    mapper: Option<ValueMapper>,
}

impl DiffOptionsBuilder {
    /// Label instances of `type_name` with the value of `key_field`.
    ///
    /// `key_field` may be a bare field name of that type or a field path.
    pub fn key_field(mut self, type_name: impl Into<String>, key_field: impl Into<String>) -> Self {
        self.key_fields.push((type_name.into(), key_field.into()));
        self
    }

    /// Align elements of the repeated message field `field` by `key_field`.
    pub fn correlate_by_field(mut self, field: impl Into<String>, key_field: impl Into<String>) -> Self {
        self.correlate_by.push((field.into(), Some(key_field.into())));
        self
    }

    /// Cancel identical elements of the repeated primitive field `field`
    /// before comparing the rest by position.
    pub fn correlate(mut self, field: impl Into<String>) -> Self {
        self.correlate_by.push((field.into(), None));
        self
    }

    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.excluded.push(field.into());
        self
    }

    pub fn exclude_all<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Render the values of `field` as `****`.
    pub fn redact(mut self, field: impl Into<String>) -> Self {
        self.redacted.push(field.into());
        self
    }

    pub fn redact_all<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redacted.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn mapper(mut self, mapper: ValueMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Freeze the accumulated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for any field path with fewer than two
    /// segments.
    pub fn build(self) -> Result<DiffOptions> {
        let mut key_fields = HashMap::with_capacity(self.key_fields.len());
        for (type_name, key) in self.key_fields {
            let address = if key.contains('.') {
                FieldAddress::parse(&key)?
            } else {
                let short = type_name.rsplit('.').next().unwrap_or(&type_name);
                FieldAddress::parse(&format!("{}.{}", short, key))?
            };
            key_fields.insert(type_name, address);
        }
        Ok(DiffOptions {
            key_fields,
            correlate_by: canonical_key_map(self.correlate_by)?,
            excluded: canonical_set(self.excluded)?,
            redacted: canonical_set(self.redacted)?,
            mapper: self.mapper,
        })
    }
}
