//! Shared types for the glassfall demo.
//!
//! # Invariants
//! - Viewport dimensions are world units at the camera focus plane, not pixels.
//! - Cover sizing never distorts the reference image aspect ratio.

pub mod viewport;

pub use viewport::{BACKGROUND_REF_HEIGHT, BACKGROUND_REF_WIDTH, Viewport, cover_size};
