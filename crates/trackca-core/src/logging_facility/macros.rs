//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operation
//! boundaries. Extra fields are passed through to `tracing` unchanged.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use trackca_core::log_op_start;
/// log_op_start!("run_event");
/// log_op_start!("run_event", n_items = 12usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackca_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackca_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use trackca_core::log_op_end;
/// log_op_end!("run_event", duration_ms = 3, n_paths = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackca_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = trackca_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into the structured `ExError` to obtain its stable
/// kind and code, and tagged with the operation. A `TrackCaError` or an
/// `ExError` that already carries event context are both accepted. The
/// rendered error goes into the `err` field.
///
/// # Example
///
/// ```
/// # use trackca_core::{log_op_error, errors::TrackCaError};
/// let err = TrackCaError::Internal { message: "boom".to_string() };
/// log_op_error!("run_event", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err = ExError::from($err).with_op($op);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = trackca_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err = %ex_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err = ExError::from($err).with_op($op);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = trackca_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err = %ex_err,
            $($field)*
        );
    }};
}
