//! Structured logging facility for the diff, merge and simplify engines
//!
//! This module provides:
//! - Optional subscriber installation via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use recordkit_core::logging_facility::{init, Profile};
//!
//! // Once at host startup; skip it if the host installs its own subscriber
//! init(Profile::Development);
//! ```
//!
//! # Boundary macros
//!
//! - `log_op_start!(op, type_name, ...)` - operation start
//! - `log_op_end!(op, type_name, started, ...)` - success with `duration_ms`
//! - `log_op_error!(op, type_name, started, &err)` - failure with `err_kind`,
//!   `err_code` and `err_field`

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile, LOG_ENV_VAR};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
