//! Error handling for the checker
//!
//! This module defines the error types shared by the batch engine, the
//! ingestion/persistence collaborators and the HTTP boundary.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{CheckerError, ParseError, Result};
