//! Failover subsystem.
//!
//! # Data Flow
//! ```text
//! execute(method, params)
//!     → Codec::encode (once per call)
//!     → Transport::post(ring.current())
//!         success  → Codec::decode → no `error` member → return
//!         failure  → policy.rs decides:
//!                      NoRotate                 → return the error as-is
//!                      AlwaysRotate             → rotate, try again
//!                      RotateUntilHookApproves  → consult hook, rotate until it says stop
//!     → attempts bounded by ring size → Exhausted
//! ```
//!
//! # Design Decisions
//! - No backoff or sleeping between attempts
//! - Policy is chosen once at construction
//! - Ring lock is never held across an await point

pub mod controller;
pub mod policy;

pub use controller::FailoverController;
pub use policy::{DecisionHook, FailoverPolicy};
