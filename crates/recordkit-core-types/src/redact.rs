//! Redaction marker for values that must never be rendered
//!
//! The `Redacted<T>` wrapper masks its content in both `Debug` and `Display`,
//! so a redacted field value cannot leak into a diff report or a log line.

use std::fmt;

/// Mask written in place of a redacted value.
pub const REDACTION_MASK: &str = "****";

/// Wrapper that renders as [`REDACTION_MASK`] in Debug and Display
///
/// # Example
///
/// ```
/// use recordkit_core_types::Redacted;
///
/// let ssn = Redacted::new("123-45-6789");
/// assert_eq!(format!("{}", ssn), "****");
/// assert_eq!(format!("{:?}", ssn), "****");
///
/// // The underlying value stays reachable for comparison
/// assert_eq!(ssn.expose(), &"123-45-6789");
/// ```
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    /// Wrap a value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTION_MASK)
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTION_MASK)
    }
}

impl<T: Clone> Clone for Redacted<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_debug_masks_value() {
        let secret = Redacted::new("my-secret-password");
        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, REDACTION_MASK);
        assert!(!debug_str.contains("my-secret-password"));
    }

    #[test]
    fn test_redacted_display_masks_value() {
        let secret = Redacted::new(12345_u64);
        assert_eq!(secret.to_string(), "****");
    }

    #[test]
    fn test_redacted_expose() {
        let secret = Redacted::new(42);
        assert_eq!(secret.expose(), &42);
    }

    #[test]
    fn test_redacted_into_inner() {
        let secret = Redacted::new(String::from("test"));
        assert_eq!(secret.into_inner(), "test");
    }

    #[test]
    fn test_redacted_inside_struct_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Member {
            name: String,
            phone: Redacted<String>,
        }

        let member = Member {
            name: "alice".to_string(),
            phone: Redacted::new("5550100".to_string()),
        };

        let debug_str = format!("{:?}", member);
        assert!(debug_str.contains("alice"));
        assert!(debug_str.contains("****"));
        assert!(!debug_str.contains("5550100"));
    }
}
