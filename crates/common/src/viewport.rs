use serde::{Deserialize, Serialize};

/// Pixel width of the reference background image.
pub const BACKGROUND_REF_WIDTH: f32 = 5000.0;
/// Pixel height of the reference background image.
pub const BACKGROUND_REF_HEIGHT: f32 = 3800.0;

/// Visible extent in world units at the camera's focus plane.
///
/// Recomputed on every resize; consumers (simulator, background sizing) treat
/// it as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Visible extent of a perspective camera at `distance` along its view
    /// direction. `fov_y` is the vertical field of view in radians.
    pub fn from_perspective(fov_y: f32, aspect: f32, distance: f32) -> Self {
        let height = 2.0 * (fov_y * 0.5).tan() * distance;
        Self {
            width: height * aspect,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Plane dimensions that make the reference background image cover the
/// viewport without distortion, like CSS `background-size: cover`.
///
/// Wide viewports scale by width, tall ones by height.
pub fn cover_size(aspect: f32, viewport: Viewport) -> (f32, f32) {
    let ref_aspect = BACKGROUND_REF_WIDTH / BACKGROUND_REF_HEIGHT;
    let s = if aspect > ref_aspect {
        viewport.width / BACKGROUND_REF_WIDTH
    } else {
        viewport.height / BACKGROUND_REF_HEIGHT
    };
    (BACKGROUND_REF_WIDTH * s, BACKGROUND_REF_HEIGHT * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_wide_viewport_scales_by_width() {
        // aspect 2.0 is wider than 5000/3800, so the width branch applies
        let vp = Viewport::new(10.0, 5.0);
        let (w, h) = cover_size(2.0, vp);
        assert!((w - 10.0).abs() < 1e-5);
        assert!((h - 3800.0 * (10.0 / 5000.0)).abs() < 1e-5);
    }

    #[test]
    fn cover_tall_viewport_scales_by_height() {
        // aspect 1.0 is narrower than 5000/3800, so the height branch applies
        let vp = Viewport::new(6.0, 6.0);
        let (w, h) = cover_size(1.0, vp);
        assert!((h - 6.0).abs() < 1e-5);
        assert!((w - 5000.0 * (6.0 / 3800.0)).abs() < 1e-5);
    }

    #[test]
    fn cover_always_fills_both_axes() {
        for &(aspect, vw, vh) in &[(0.5f32, 4.0f32, 8.0f32), (1.3, 13.0, 10.0), (3.0, 30.0, 10.0)] {
            let (w, h) = cover_size(aspect, Viewport::new(vw, vh));
            assert!(w >= vw - 1e-4, "aspect {aspect}: width {w} < viewport {vw}");
            assert!(h >= vh - 1e-4, "aspect {aspect}: height {h} < viewport {vh}");
        }
    }

    #[test]
    fn perspective_viewport_matches_fov() {
        // 90 degree fov at distance 1 sees a height of exactly 2
        let vp = Viewport::from_perspective(90.0_f32.to_radians(), 1.5, 1.0);
        assert!((vp.height - 2.0).abs() < 1e-5);
        assert!((vp.width - 3.0).abs() < 1e-5);
        assert!((vp.aspect() - 1.5).abs() < 1e-5);
    }
}
