//! Particle field: per-instance kinematic state for the falling diamonds.
//!
//! # Invariants
//! - Population is fixed at creation; particles are mutated in place, never
//!   destroyed.
//! - Given the same seed and elapsed-time sequence, the field produces
//!   identical transform arrays (deterministic replay).
//! - The viewport is read-only input; only `set_viewport` changes it.

pub mod field;

pub use field::{CENTER_COLUMN, FALL_LIMIT, POPULATION, Particle, ParticleField};
