//! HTTP server implementation
//!
//! Upload, download, status and the live event WebSocket.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;
mod utils;
