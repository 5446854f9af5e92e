//! Structured logging facility for trackca
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The algorithm phases log their per-round diagnostics at `debug` level; the
//! drivers in `pipeline` and `multipass` own the start/end boundary events.
//!
//! # Usage
//!
//! ```rust
//! use trackca_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
