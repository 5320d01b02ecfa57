use glam::{Mat4, Vec3};
use glassfall_common::Viewport;

/// Fixed perspective camera looking down -Z at the particle field.
///
/// Nothing moves it; only the aspect ratio changes with the window.
pub struct SceneCamera {
    pub position: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 30.0),
            fov: 50.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl SceneCamera {
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// World-unit extent visible at the z = 0 focus plane, where the
    /// particle field and background live.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_perspective(self.fov, self.aspect, self.position.z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_produces_valid_matrices() {
        let cam = SceneCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
        assert_eq!(cam.position.z, 30.0);
    }

    #[test]
    fn viewport_tracks_aspect() {
        let mut cam = SceneCamera::default();
        cam.set_aspect(1920, 1080);
        let vp = cam.viewport();
        assert!((vp.aspect() - 1920.0 / 1080.0).abs() < 1e-5);
        // 50 degrees at distance 30: height = 2 * tan(25deg) * 30
        let expected = 2.0 * 25.0_f32.to_radians().tan() * 30.0;
        assert!((vp.height - expected).abs() < 1e-4);
    }

    #[test]
    fn zero_height_window_does_not_divide_by_zero() {
        let mut cam = SceneCamera::default();
        cam.set_aspect(800, 0);
        assert!(cam.aspect.is_finite());
    }
}
