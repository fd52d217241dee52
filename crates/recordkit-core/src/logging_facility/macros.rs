//! Operation boundary macros
//!
//! Every engine entry point brackets its work with one start event and
//! exactly one of an end or end_error event. All three carry the record
//! type the operation ran on; the closing events derive `duration_ms` from
//! the `Instant` captured at the start.

/// Log the start of an engine operation on records of `type_name`
///
/// # Example
///
/// ```
/// # use recordkit_core::log_op_start;
/// log_op_start!("diff", "library.Member");
/// log_op_start!("merge", "library.Member", field = "Member.borrow_history");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, $type_name:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = recordkit_core_types::schema::EVENT_START,
            type_name = $type_name,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation started at `started`
///
/// # Example
///
/// ```
/// # use recordkit_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("merge", "library.Member", started, converged = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $type_name:expr, $started:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = recordkit_core_types::schema::EVENT_END,
            type_name = $type_name,
            duration_ms = $started.elapsed().as_millis() as u64,
            $($($field)*)?
        );
    };
}

/// Log the failure of an operation started at `started`
///
/// Takes the error by reference; the event carries its kind, its stable
/// code and the field it names (empty when the error names none).
///
/// # Example
///
/// ```
/// # use recordkit_core::{log_op_error, errors::RecordKitError};
/// let started = std::time::Instant::now();
/// let err = RecordKitError::MissingMergeKey { field: "Member.borrow_history".to_string() };
/// log_op_error!("merge", "library.Member", started, &err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $type_name:expr, $started:expr, $err:expr) => {{
        let ex_err = $crate::errors::ExError::from(::std::clone::Clone::clone($err))
            .with_op($op);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = recordkit_core_types::schema::EVENT_END_ERROR,
            type_name = $type_name,
            duration_ms = $started.elapsed().as_millis() as u64,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_field = ex_err.field().unwrap_or_default(),
            "{}",
            ex_err
        );
    }};
}
