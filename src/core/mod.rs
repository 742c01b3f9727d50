//! Core functionality for the checker
//!
//! This module contains the batch engine and the data structures it works on.

pub mod batch;
pub mod events;
pub mod models;
pub mod verification;
