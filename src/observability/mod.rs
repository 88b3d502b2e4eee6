//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers + middleware produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape (when enabled)
//! ```

pub mod logging;
pub mod metrics;
