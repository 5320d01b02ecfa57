/// Scene partition tags. The camera draws exactly one layer per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderLayer {
    /// The instanced diamond mesh.
    Diamonds,
    /// The fullscreen background plane, excluded from the backface capture.
    Background,
}

/// Where a pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassTarget {
    /// Offscreen target holding the captured background.
    Env,
    /// Offscreen target holding world-space backface normals.
    Backface,
    /// The window surface.
    Screen,
}

/// Which material the diamond mesh wears during a diamond-layer pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiamondShading {
    /// Inverted culling, writes world-space normals of back faces.
    Backface,
    /// Samples the env and backface captures to refract the background.
    Refraction,
}

/// One render pass: target, layer, shading, and clear behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassDesc {
    pub label: &'static str,
    pub target: PassTarget,
    pub layer: RenderLayer,
    /// Shading for the diamond mesh; `None` on background-layer passes.
    pub shading: Option<DiamondShading>,
    /// Clear the color attachment before drawing; otherwise load it.
    pub clear_color: bool,
    /// Clear the depth attachment before drawing; otherwise load it.
    pub clear_depth: bool,
}

/// The fixed four-pass sequence producing one displayed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    passes: [PassDesc; 4],
}

impl Default for FramePlan {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePlan {
    pub fn new() -> Self {
        Self {
            passes: [
                // Background-only capture feeding the refraction shader.
                // No clears: the cover-sized plane overwrites the whole target.
                PassDesc {
                    label: "env-capture",
                    target: PassTarget::Env,
                    layer: RenderLayer::Background,
                    shading: None,
                    clear_color: false,
                    clear_depth: false,
                },
                // Backface normals of the diamonds. Depth-only clear; color
                // is deliberately loaded, matching the original sequence.
                PassDesc {
                    label: "backface-capture",
                    target: PassTarget::Backface,
                    layer: RenderLayer::Diamonds,
                    shading: Some(DiamondShading::Backface),
                    clear_color: false,
                    clear_depth: true,
                },
                // Background to the screen. The surface texture needs a
                // defined color load, so this pass clears it.
                PassDesc {
                    label: "background-to-screen",
                    target: PassTarget::Screen,
                    layer: RenderLayer::Background,
                    shading: None,
                    clear_color: true,
                    clear_depth: false,
                },
                // Refracted diamonds on top; depth cleared so the diamonds
                // never test against the background plane's pass.
                PassDesc {
                    label: "refraction-to-screen",
                    target: PassTarget::Screen,
                    layer: RenderLayer::Diamonds,
                    shading: Some(DiamondShading::Refraction),
                    clear_color: false,
                    clear_depth: true,
                },
            ],
        }
    }

    pub fn passes(&self) -> &[PassDesc; 4] {
        &self.passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_four_passes_in_fixed_order() {
        let plan = FramePlan::new();
        let labels: Vec<_> = plan.passes().iter().map(|p| p.label).collect();
        assert_eq!(
            labels,
            [
                "env-capture",
                "backface-capture",
                "background-to-screen",
                "refraction-to-screen"
            ]
        );
    }

    #[test]
    fn capture_passes_use_offscreen_targets() {
        let plan = FramePlan::new();
        let p = plan.passes();
        assert_eq!(p[0].target, PassTarget::Env);
        assert_eq!(p[1].target, PassTarget::Backface);
        assert_eq!(p[2].target, PassTarget::Screen);
        assert_eq!(p[3].target, PassTarget::Screen);
    }

    #[test]
    fn layers_alternate_background_and_diamonds() {
        let plan = FramePlan::new();
        let layers: Vec<_> = plan.passes().iter().map(|p| p.layer).collect();
        assert_eq!(
            layers,
            [
                RenderLayer::Background,
                RenderLayer::Diamonds,
                RenderLayer::Background,
                RenderLayer::Diamonds
            ]
        );
    }

    #[test]
    fn backface_capture_clears_depth_only() {
        let plan = FramePlan::new();
        let backface = plan.passes()[1];
        assert!(backface.clear_depth);
        assert!(!backface.clear_color, "backface color must be loaded, not cleared");
    }

    #[test]
    fn diamond_passes_carry_shading() {
        let plan = FramePlan::new();
        let p = plan.passes();
        assert_eq!(p[0].shading, None);
        assert_eq!(p[1].shading, Some(DiamondShading::Backface));
        assert_eq!(p[2].shading, None);
        assert_eq!(p[3].shading, Some(DiamondShading::Refraction));
    }

    #[test]
    fn plan_is_identical_every_frame() {
        // Idempotent re-execution: the plan carries no per-frame state.
        assert_eq!(FramePlan::new(), FramePlan::new());
        assert_eq!(FramePlan::default(), FramePlan::new());
    }
}
