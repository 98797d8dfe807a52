//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! controller / ranker / client produce:
//!     → tracing events (requests, responses, rotations, probe scores)
//!     → metrics.rs (counters and gauges through the `metrics` facade)
//!
//! Consumers:
//!     → logging.rs subscriber installed by the binary
//!     → any `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a global subscriber or recorder
//! - Recording without a recorder is a no-op

pub mod logging;
pub mod metrics;
