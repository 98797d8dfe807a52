//! Endpoint health ranking.
//!
//! # Data Flow
//! ```text
//! Explicit sort request
//!     → ranker.rs encodes the liveness probe once
//!     → one concurrent probe per distinct endpoint
//!     → join all probes (failures score 0)
//!     → stable sort of the ring by score, descending
//! ```
//!
//! # Design Decisions
//! - Ranking is one-shot and caller-invoked, never run before each call
//! - Dead endpoints sink to the back but stay in the ring
//! - Scores are not remembered between rankings

pub mod ranker;

pub use ranker::{HealthRanker, LivenessProbe, Ranking};
