//! RecordKit Core - schema-driven diff, merge and simplify for structured records
//!
//! This crate walks schema-typed record trees through an in-process
//! reflection layer and provides:
//! - Structural diff rendered as a hierarchical text report
//! - Structural merge converging two records under per-field resolvers
//! - Structural simplify stripping defaults, unknown and dropped fields
//! - Keyed-list correlation aligning repeated records by a key field
//! - Immutable per-operation options, buildable in code or from TOML

pub mod address;
pub mod config;
pub mod correlate;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod mapper;
pub mod merge;
pub mod options;
pub mod reflect;
pub mod simplify;

// Re-export commonly used types
pub use address::FieldAddress;
pub use config::OptionsConfig;
pub use diff::diff;
pub use errors::{ExError, ExErrorKind, RecordKitError, Result};
pub use mapper::{Side, ValueMapper};
pub use merge::merge;
pub use options::{DiffOptions, MergeOptions, Resolver, SimplifyOptions};
pub use reflect::{
    EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, MessageDescriptor, Record, ScalarType,
    UnknownFields, UnknownValue, Value,
};
pub use simplify::simplify;
