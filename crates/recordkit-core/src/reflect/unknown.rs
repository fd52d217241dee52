//! Fields read from the wire that the current schema does not declare.

use std::collections::BTreeMap;

/// One raw value of an unrecognized field, by wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownValue {
    Varint(u64),
    Fixed32(u32),
    Fixed64(u64),
    LengthDelimited(Vec<u8>),
}

/// Unrecognized fields keyed by field number, values in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFields {
    fields: BTreeMap<u32, Vec<UnknownValue>>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw value for `number`.
    pub fn add(&mut self, number: u32, value: UnknownValue) {
        self.fields.entry(number).or_default().push(value);
    }

    pub fn get(&self, number: u32) -> Option<&[UnknownValue]> {
        self.fields.get(&number).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of distinct field numbers held.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[UnknownValue])> {
        self.fields.iter().map(|(n, v)| (*n, v.as_slice()))
    }
}
