//! Backend-agnostic frame plan.
//!
//! The per-frame render sequence is data, not mutable renderer state: a fixed
//! ordered list of pass descriptions that a backend executes verbatim. This
//! replaces the original pattern of flipping camera layer masks and a
//! "current render target" between draws.
//!
//! # Invariants
//! - Exactly four passes per displayed frame, always in the same order.
//! - The backface capture clears depth only; its color buffer is loaded.
//! - Re-executing the plan is idempotent; no pass leaks state into the next
//!   frame.

mod plan;

pub use plan::{DiamondShading, FramePlan, PassDesc, PassTarget, RenderLayer};
