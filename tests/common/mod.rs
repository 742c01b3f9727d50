//! Common test utilities for account-checker-rs
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{TestEngine, fixtures, policies::ScriptedPolicy};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let policy = ScriptedPolicy::succeeding(["user01"]);
//!     let engine = TestEngine::new(3, policy);
//!     let ticket = engine.coordinator.submit(fixtures::numbered_records(2)).await.unwrap();
//!     ticket.wait().await.unwrap();
//! }
//! ```

pub mod engine;
pub mod policies;

pub use engine::TestEngine;
pub use policies::ScriptedPolicy;
pub use stores::MemoryResultStore;
