use super::{canonical_key_map, canonical_set};
use crate::address::FieldAddress;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Policy for reconciling a conflicting singular field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolver {
    /// Keep the larger value on both sides.
    ///
    /// Numbers, strings and bytes use their natural order and enum constants
    /// order by declared number. Values without a natural order (`NaN`,
    /// mixed kinds) compare by their rendered text.
    Greater,
    /// Keep the smaller value on both sides; ordered as for [`Resolver::Greater`].
    Lesser,
    /// Keep the first side's value (or absence).
    First,
    /// Keep the second side's value (or absence).
    Second,
    /// Clear both sides back to the field default.
    Default,
}

impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resolver::Greater => "GREATER",
            Resolver::Lesser => "LESSER",
            Resolver::First => "FIRST",
            Resolver::Second => "SECOND",
            Resolver::Default => "DEFAULT",
        };
        f.write_str(name)
    }
}

/// Frozen configuration for [`merge`](crate::merge::merge).
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    resolvers: HashMap<FieldAddress, Resolver>,
    merge_by: HashMap<FieldAddress, Option<FieldAddress>>,
    excluded: HashSet<FieldAddress>,
}

impl MergeOptions {
    pub fn builder() -> MergeOptionsBuilder {
        MergeOptionsBuilder::default()
    }

    pub fn resolver(&self, field: &FieldAddress) -> Option<Resolver> {
        self.resolvers.get(field).copied()
    }

    /// Whether a repeated field with elements on both sides is merged.
    pub fn is_merged(&self, field: &FieldAddress) -> bool {
        self.merge_by.contains_key(field)
    }

    /// Key field used to pair elements of a merged repeated message field.
    pub fn merge_key(&self, field: &FieldAddress) -> Option<&FieldAddress> {
        self.merge_by.get(field).and_then(Option::as_ref)
    }

    pub fn is_excluded(&self, field: &FieldAddress) -> bool {
        self.excluded.contains(field)
    }
}

/// Builder for [`MergeOptions`].
#[derive(Debug, Default)]
pub struct MergeOptionsBuilder {
    resolvers: Vec<(String, Resolver)>,
    merge_by: Vec<(String, Option<String>)>,
    excluded: Vec<String>,
}

impl MergeOptionsBuilder {
    pub fn resolver(mut self, field: impl Into<String>, resolver: Resolver) -> Self {
        self.resolvers.push((field.into(), resolver));
        self
    }

    pub fn resolvers<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Resolver)>,
        S: Into<String>,
    {
        self.resolvers
            .extend(entries.into_iter().map(|(f, r)| (f.into(), r)));
        self
    }

    /// Merge the repeated message field `field`, pairing elements by `key_field`.
    pub fn merge_by_field(mut self, field: impl Into<String>, key_field: impl Into<String>) -> Self {
        self.merge_by.push((field.into(), Some(key_field.into())));
        self
    }

    /// Merge the repeated primitive field `field` as a union of both sides.
    pub fn merge_repeated(mut self, field: impl Into<String>) -> Self {
        self.merge_by.push((field.into(), None));
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

    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for any field path with fewer than two
    /// segments.
    pub fn build(self) -> Result<MergeOptions> {
        let mut resolvers = HashMap::with_capacity(self.resolvers.len());
        for (field, resolver) in self.resolvers {
            resolvers.insert(FieldAddress::parse(&field)?, resolver);
        }
        Ok(MergeOptions {
            resolvers,
            merge_by: canonical_key_map(self.merge_by)?,
            excluded: canonical_set(self.excluded)?,
        })
    }
}
