//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Record identifiers
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_FIELD: &str = "field";

// Collection sizes
pub const FIELD_MATCHED_LEN: &str = "matched_len";
pub const FIELD_LEFT_UNMATCHED_LEN: &str = "left_unmatched_len";
pub const FIELD_RIGHT_UNMATCHED_LEN: &str = "right_unmatched_len";
pub const FIELD_REPORT_LEN: &str = "report_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_FIELD: &str = "err_field";

// Engine operations
pub const OP_DIFF: &str = "diff";
pub const OP_MERGE: &str = "merge";
pub const OP_SIMPLIFY: &str = "simplify";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
