use super::canonical_set;
use crate::address::FieldAddress;
use crate::errors::Result;
use std::collections::HashSet;

/// Frozen configuration for [`simplify`](crate::simplify::simplify).
#[derive(Debug, Clone, Default)]
pub struct SimplifyOptions {
    dropped: HashSet<FieldAddress>,
}

impl SimplifyOptions {
    pub fn builder() -> SimplifyOptionsBuilder {
        SimplifyOptionsBuilder::default()
    }

    /// Whether `field` is cleared unconditionally.
    pub fn is_dropped(&self, field: &FieldAddress) -> bool {
        self.dropped.contains(field)
    }
}

/// Builder for [`SimplifyOptions`].
#[derive(Debug, Default)]
pub struct SimplifyOptionsBuilder {
    dropped: Vec<String>,
}

impl SimplifyOptionsBuilder {
    pub fn drop_field(mut self, field: impl Into<String>) -> Self {
        self.dropped.push(field.into());
        self
    }

    pub fn drop_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dropped.extend(fields.into_iter().map(Into::into));
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for any field path with fewer than two
    /// segments.
    pub fn build(self) -> Result<SimplifyOptions> {
        Ok(SimplifyOptions {
            dropped: canonical_set(self.dropped)?,
        })
    }
}
