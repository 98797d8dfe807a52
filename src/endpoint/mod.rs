//! Endpoint pool subsystem.
//!
//! # Data Flow
//! ```text
//! Caller-supplied endpoint list
//!     → ring.rs (ordered, rotatable pool)
//!     → FailoverController reads current/next, rotates on failure
//!     → HealthRanker reorders on explicit request
//! ```
//!
//! # Design Decisions
//! - Endpoints are opaque strings; validation happens in config
//! - The ring never gains or loses members after construction
//! - Duplicates are tolerated

pub mod ring;

pub use ring::EndpointRing;
