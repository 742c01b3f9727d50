//! Storage layer for the checker
//!
//! Credential files come in through [`tabular::parse_records`]; outcomes go
//! out as CSV artifacts through a [`ResultStore`].

pub mod results;
pub mod tabular;

pub use results::{LocalResultStore, Partition, ResultStore, validate_artifact_name};
pub use tabular::{parse_records, write_records};
