//! Request middleware.
//!
//! Purpose: Define middleware components for response lifecycle concerns such
//! as trace correlation and default headers.

pub mod headers;

pub use headers::ResponseHeaders;
