//! Options configuration (TOML)
//!
//! ```toml
//! [diff]
//! exclude = ["Member.member_id"]
//! redact = ["Member.email"]
//! correlate = ["Book.tags"]
//!
//! [diff.key_fields]
//! "library.Book" = "book_id"
//!
//! [diff.correlate_by]
//! "Member.borrow_history" = "Book.book_id"
//!
//! [merge]
//! merge_repeated = ["Book.tags"]
//!
//! [merge.resolvers]
//! "Book.copies" = "greater"
//!
//! [merge.merge_by]
//! "Member.borrow_history" = "Book.book_id"
//!
//! [simplify]
//! drop = ["Address.country"]
//! ```
//!
//! Value mappers are code-only and cannot be configured here.

use crate::errors::{RecordKitError, Result};
use crate::options::{DiffOptions, MergeOptions, Resolver, SimplifyOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Diff section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Type name to the field whose value labels its instances
    pub key_fields: BTreeMap<String, String>,

    /// Repeated message field to the key field aligning its elements
    pub correlate_by: BTreeMap<String, String>,

    /// Repeated primitive fields whose identical elements cancel out
    pub correlate: Vec<String>,

    pub exclude: Vec<String>,

    pub redact: Vec<String>,
}

/// Merge section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub resolvers: BTreeMap<String, Resolver>,

    /// Repeated message field to the key field pairing its elements
    pub merge_by: BTreeMap<String, String>,

    /// Repeated primitive fields merged as a union
    pub merge_repeated: Vec<String>,

    pub exclude: Vec<String>,
}

/// Simplify section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimplifyConfig {
    pub drop: Vec<String>,
}

/// Root of an options document; every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    pub diff: DiffConfig,
    pub merge: MergeConfig,
    pub simplify: SimplifyConfig,
}

impl OptionsConfig {
    /// Parse an options document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document is not valid TOML or does
    /// not match the expected layout.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| RecordKitError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Render the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RecordKitError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for any field path with fewer than two
    /// segments.
    pub fn diff_options(&self) -> Result<DiffOptions> {
        let cfg = &self.diff;
        let mut builder = DiffOptions::builder()
            .exclude_all(cfg.exclude.iter().cloned())
            .redact_all(cfg.redact.iter().cloned());
        for (type_name, key) in &cfg.key_fields {
            builder = builder.key_field(type_name.clone(), key.clone());
        }
        for (field, key) in &cfg.correlate_by {
            builder = builder.correlate_by_field(field.clone(), key.clone());
        }
        for field in &cfg.correlate {
            builder = builder.correlate(field.clone());
        }
        builder.build()
    }

    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for any field path with fewer than two
    /// segments.
    pub fn merge_options(&self) -> Result<MergeOptions> {
        let cfg = &self.merge;
        let mut builder = MergeOptions::builder()
            .resolvers(cfg.resolvers.iter().map(|(f, r)| (f.clone(), *r)))
            .exclude_all(cfg.exclude.iter().cloned());
        for (field, key) in &cfg.merge_by {
            builder = builder.merge_by_field(field.clone(), key.clone());
        }
        for field in &cfg.merge_repeated {
            builder = builder.merge_repeated(field.clone());
        }
        builder.build()
    }

    /// # Errors
    ///
    /// Returns `InvalidFieldAddress` for any field path with fewer than two
    /// segments.
    pub fn simplify_options(&self) -> Result<SimplifyOptions> {
        SimplifyOptions::builder()
            .drop_fields(self.simplify.drop.iter().cloned())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::FieldAddress;

    const SAMPLE: &str = r#"
[diff]
exclude = ["Member.member_id"]
correlate = ["Book.tags"]

[diff.correlate_by]
"Member.borrow_history" = "Book.book_id"

[merge.resolvers]
"library.Book.copies" = "greater"
"Book.genre" = "second"

[simplify]
drop = ["Address.country"]
"#;

    #[test]
    fn test_parse_and_convert() {
        let config = OptionsConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.merge.resolvers.len(), 2);

        let diff = config.diff_options().unwrap();
        assert!(diff.is_excluded(&FieldAddress::new("Member", "member_id")));
        assert_eq!(
            diff.correlation_key(&FieldAddress::new("Member", "borrow_history")),
            Some(&FieldAddress::new("Book", "book_id"))
        );
        assert!(diff.is_correlated(&FieldAddress::new("Book", "tags")));

        let merge = config.merge_options().unwrap();
        assert_eq!(
            merge.resolver(&FieldAddress::new("Book", "copies")),
            Some(Resolver::Greater)
        );

        let simplify = config.simplify_options().unwrap();
        assert!(simplify.is_dropped(&FieldAddress::new("Address", "country")));
    }

    #[test]
    fn test_empty_document_is_noop() {
        let config = OptionsConfig::from_toml_str("").unwrap();
        assert_eq!(config, OptionsConfig::default());
    }

    #[test]
    fn test_bad_documents_fail() {
        let err = OptionsConfig::from_toml_str("[merge.resolvers]\n\"Book.copies\" = \"biggest\"")
            .unwrap_err();
        assert!(matches!(err, RecordKitError::InvalidConfig { .. }));

        let err = OptionsConfig::from_toml_str("[diff]\nunknown = 1").unwrap_err();
        assert!(matches!(err, RecordKitError::InvalidConfig { .. }));

        let config = OptionsConfig::from_toml_str("[simplify]\ndrop = [\"country\"]").unwrap();
        assert!(matches!(
            config.simplify_options().unwrap_err(),
            RecordKitError::InvalidFieldAddress { .. }
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = OptionsConfig::from_toml_str(SAMPLE).unwrap();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(OptionsConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
