//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::CheckerError;

impl HttpServer {
    /// Turn a bind failure into an actionable message
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> CheckerError {
        let error_str = error.to_string();

        if error.kind() == std::io::ErrorKind::AddrInUse
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            let message = format!(
                r#"
Port {port} is already in use.
  Use a different port:   --port {next} or CHECKER_PORT={next}
  Find the other process: lsof -i:{port}
"#,
                port = port,
                next = port.saturating_add(1),
            );
            CheckerError::server(message)
        } else if error.kind() == std::io::ErrorKind::PermissionDenied
            || error_str.contains("os error 13")
        {
            let message = format!(
                r#"
Permission denied for port {port}.
  Use a port >= 1024:     --port 8080 or CHECKER_PORT=8080
"#,
                port = port,
            );
            CheckerError::server(message)
        } else {
            CheckerError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
