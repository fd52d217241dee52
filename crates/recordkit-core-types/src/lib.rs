//! Core types shared across recordkit facilities
//!
//! This crate provides foundational types used by the error handling,
//! logging and report rendering facilities:
//!
//! - **Redaction**: `Redacted<T>` marker that masks a value in reports and logs
//! - **Schema constants**: Canonical field keys and event names

pub mod redact;
pub mod schema;

pub use redact::{Redacted, REDACTION_MASK};
