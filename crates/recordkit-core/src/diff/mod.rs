//! Structural diff.
//!
//! Compares two records field by field and renders a hierarchical text
//! report:
//!
//! ```text
//!   Address: {
//!     city: C1 => C2
//! +   postal_code: P
//! -   country: CN
//!   }
//! ```
//!
//! Unchanged fields and unchanged nested records are elided. Repeated fields
//! are compared by position unless configured for correlation, in which case
//! identical elements cancel out and message elements are aligned by a key
//! field before comparison.

pub mod engine;
pub mod render;

pub use engine::diff;
pub use render::Sign;
