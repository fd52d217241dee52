//! Operation options.
//!
//! Each operation takes an immutable options value produced by a builder.
//! Builders accumulate raw field paths; `build()` canonicalizes them into
//! [`FieldAddress`](crate::address::FieldAddress) keys, so every lookup
//! resolves short and hierarchical paths identically. `Default` is the
//! no-op configuration used when an entry point receives `None`.

pub mod diff;
pub mod merge;
pub mod simplify;

pub use diff::{DiffOptions, DiffOptionsBuilder};
pub use merge::{MergeOptions, MergeOptionsBuilder, Resolver};
pub use simplify::{SimplifyOptions, SimplifyOptionsBuilder};

use crate::address::FieldAddress;
use crate::errors::Result;
use std::collections::{HashMap, HashSet};

fn canonical_set(paths: Vec<String>) -> Result<HashSet<FieldAddress>> {
    paths.iter().map(|p| FieldAddress::parse(p)).collect()
}

fn canonical_key_map(
    entries: Vec<(String, Option<String>)>,
) -> Result<HashMap<FieldAddress, Option<FieldAddress>>> {
    let mut map = HashMap::with_capacity(entries.len());
    for (field, key) in entries {
        let key = key.as_deref().map(FieldAddress::parse).transpose()?;
        map.insert(FieldAddress::parse(&field)?, key);
    }
    Ok(map)
}
