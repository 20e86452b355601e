//! GSMS Observability
//!
//! - Tracing, with OpenTelemetry export
//! - Prometheus metrics, including sign-in and sign-up counters
//! - HTTP request logging
//!
//! Compiled in through the `observability` feature (default) and switched
//! off at runtime with `OBSERVABILITY_ENABLED=false`. Without either, only
//! [`basic_logging`] console output is available and every tracking
//! function is a no-op.
//!
//! # Examples
//!
//! ```no_run
//! use gsms_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_role_mismatch, track_sign_in_failure,
    track_sign_in_success, track_sign_out, track_sign_up,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Falls back to console logging.
    pub fn init_tracing() {
        super::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn track_sign_in_success(_method: &str) {}
    pub fn track_sign_in_failure(_reason: &str) {}
    pub fn track_role_mismatch(_claimed: &str) {}
    pub fn track_sign_up(_role: &str) {}
    pub fn track_sign_out() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
