use thiserror::Error;

/// Result type alias using RecordKitError
pub type Result<T> = std::result::Result<T, RecordKitError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and structured log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Schema
    TypeMismatch,
    UnknownField,
    InvalidFieldValue,
    InvalidFieldAddress,

    // Correlation
    MissingCorrelationKey,
    MissingMergeKey,
    NonUniqueCorrelationKey,

    // Policy
    UnsupportedResolver,

    // Configuration
    InvalidConfig,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::InvalidFieldValue => "ERR_INVALID_FIELD_VALUE",
            ExErrorKind::InvalidFieldAddress => "ERR_INVALID_FIELD_ADDRESS",
            ExErrorKind::MissingCorrelationKey => "ERR_MISSING_CORRELATION_KEY",
            ExErrorKind::MissingMergeKey => "ERR_MISSING_MERGE_KEY",
            ExErrorKind::NonUniqueCorrelationKey => "ERR_NON_UNIQUE_CORRELATION_KEY",
            ExErrorKind::UnsupportedResolver => "ERR_UNSUPPORTED_RESOLVER",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used by the logging facility (`err_kind`,
/// `err_code`) together with the record/field context of the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record type context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the record type context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diff, merge and simplify operations
///
/// Every variant is a programmer or configuration error: nothing is retried
/// and no partial result is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordKitError {
    // ===== Schema Errors =====
    /// The two records are instances of different schema types
    #[error("Cannot operate on different record types: {left} - {right}")]
    TypeMismatch { left: String, right: String },

    /// A field name is not declared by the record type
    #[error("Record type {type_name} has no field named {field}")]
    UnknownField { type_name: String, field: String },

    /// A value does not fit the declared kind of the field
    #[error("Invalid value for field {field}: expected {expected}, got {found}")]
    InvalidFieldValue {
        field: String,
        expected: String,
        found: String,
    },

    /// A field address has fewer than two dot-separated segments
    #[error("Invalid field address {path:?}: expected at least \"Type.field\"")]
    InvalidFieldAddress { path: String },

    // ===== Correlation Errors =====
    /// A repeated message field is configured for correlation without a key field
    #[error("Correlation key field not configured for repeated message field: {field}")]
    MissingCorrelationKey { field: String },

    /// A repeated message field is configured for merging without a key field
    #[error("Have to provide a key field to merge the repeated message field: {field}")]
    MissingMergeKey { field: String },

    /// Extracted key values repeat within one side of a correlation
    #[error("Key values are not unique for repeated field {field} keyed by {key_field} ({side} side)")]
    NonUniqueCorrelationKey {
        field: String,
        key_field: String,
        side: String,
    },

    // ===== Policy Errors =====
    /// A resolver was applied where it has no defined meaning
    #[error("{resolver} resolver is not applicable for field {field}: {reason}")]
    UnsupportedResolver {
        resolver: String,
        field: String,
        reason: String,
    },

    // ===== Configuration Errors =====
    /// The options configuration document could not be parsed
    #[error("Invalid options configuration: {message}")]
    InvalidConfig { message: String },
}

impl RecordKitError {
    /// Get the canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            RecordKitError::TypeMismatch { .. } => ExErrorKind::TypeMismatch,
            RecordKitError::UnknownField { .. } => ExErrorKind::UnknownField,
            RecordKitError::InvalidFieldValue { .. } => ExErrorKind::InvalidFieldValue,
            RecordKitError::InvalidFieldAddress { .. } => ExErrorKind::InvalidFieldAddress,
            RecordKitError::MissingCorrelationKey { .. } => ExErrorKind::MissingCorrelationKey,
            RecordKitError::MissingMergeKey { .. } => ExErrorKind::MissingMergeKey,
            RecordKitError::NonUniqueCorrelationKey { .. } => ExErrorKind::NonUniqueCorrelationKey,
            RecordKitError::UnsupportedResolver { .. } => ExErrorKind::UnsupportedResolver,
            RecordKitError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
        }
    }
}

/// Conversion from RecordKitError to ExError
///
/// Used by the logging facility to attach a stable kind and code to every
/// failed operation.
impl From<RecordKitError> for ExError {
    fn from(err: RecordKitError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let base = ExError::new(kind).with_message(message);
        match err {
            RecordKitError::TypeMismatch { left, .. } => base.with_type_name(left),
            RecordKitError::UnknownField { type_name, field } => {
                base.with_type_name(type_name).with_field(field)
            }
            RecordKitError::InvalidFieldValue { field, .. }
            | RecordKitError::MissingCorrelationKey { field }
            | RecordKitError::MissingMergeKey { field }
            | RecordKitError::NonUniqueCorrelationKey { field, .. }
            | RecordKitError::UnsupportedResolver { field, .. } => base.with_field(field),
            RecordKitError::InvalidFieldAddress { path } => base.with_field(path),
            RecordKitError::InvalidConfig { .. } => base,
        }
    }
}
