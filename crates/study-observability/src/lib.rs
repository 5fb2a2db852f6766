//! Study Observability
//!
//! Provides:
//! - Structured logging (console + rolling JSON files) and optional
//!   OpenTelemetry export
//! - Prometheus metrics for HTTP traffic and domain events
//! - HTTP request/response logging middleware
//!
//! Compiled in through the `observability` feature (on by default) and
//! switched off at runtime with `OBSERVABILITY_ENABLED=false`, in which case
//! only console logging remains.
//!
//! # Examples
//!
//! ```no_run
//! use study_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... serve ...
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
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_app, metrics_middleware,
    track_course_created, track_report_created, track_study_group_created, track_user_created,
};
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

// No-op stand-ins when the feature is compiled out
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Placeholder for the Prometheus handle.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app<S: Clone + Send + Sync + 'static>(_handle: PrometheusHandle) -> Router<S> {
        Router::new()
    }

    pub fn track_user_created(_role: &str) {}
    pub fn track_course_created() {}
    pub fn track_study_group_created() {}
    pub fn track_report_created(_report_type: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
