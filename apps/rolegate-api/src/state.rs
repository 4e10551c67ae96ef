//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Instant;

use rolegate_core::SessionFactory;

/// Application state shared across all handlers.
///
/// Cloned per request; the session factory sits behind an `Arc` so the
/// clone is cheap. Sessions themselves are opened per request and never
/// stored here — there is no process-wide connection.
#[derive(Clone)]
pub struct AppState {
    /// Factory yielding a request-scoped catalog session per target.
    pub sessions: Arc<dyn SessionFactory>,

    /// Service startup time for uptime calculation.
    pub startup_time: Arc<Instant>,

    /// Application version from Cargo.toml.
    pub version: &'static str,
}

impl AppState {
    /// Create a new application state around a session factory.
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self {
            sessions,
            startup_time: Arc::new(Instant::now()),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
