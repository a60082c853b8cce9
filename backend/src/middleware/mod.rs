//! Request middleware.
//!
//! Purpose: Cross-cutting request lifecycle concerns. Currently this is the
//! trace middleware that tags every request and response with a trace id.

pub mod trace;

pub use trace::Trace;
