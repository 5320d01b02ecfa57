//! wgpu render backend for the glassfall demo.
//!
//! Executes the four-pass frame plan: env capture, backface capture,
//! background to screen, refracted diamonds to screen. The two offscreen
//! captures feed the refraction shader through a bind group that is rebuilt
//! whenever the surface resolution changes.
//!
//! # Invariants
//! - Offscreen target dimensions always equal the surface pixel resolution.
//! - The renderer never mutates simulation state.
//! - The full instance array is uploaded every frame; at 80 instances the
//!   bandwidth is negligible and partial updates are not worth the tracking.

mod camera;
mod gpu;
mod shaders;
mod targets;

pub use camera::SceneCamera;
pub use gpu::DiamondRenderer;
pub use targets::RenderTargets;
