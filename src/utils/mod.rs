//! Utility modules for the checker
//!
//! - **error**: Error types and HTTP error responses
//! - **logging**: Tracing subscriber set-up

pub mod error;
pub mod logging;
