use glam::{Mat4, Vec3};

/// Perspective camera looking at the origin.
///
/// Matches the demo's fixed setup: vertical fov 75°, near 0.1, far 1000,
/// eye on the +Z axis. Only the aspect ratio changes at runtime (on resize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fovy_deg: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub eye: Vec3,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fovy_deg: 75.0,
            aspect: width as f32 / height.max(1) as f32,
            znear: 0.1,
            zfar: 1000.0,
            eye: Vec3::new(0.0, 0.0, 5.0),
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Combined view-projection matrix, wgpu depth convention (z in [0, 1]).
    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fovy_deg.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn aspect_tracks_resize() {
        let mut cam = Camera::new(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
        cam.set_aspect(1600, 900);
        assert!((cam.aspect - 1600.0 / 900.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::new(800, 600);
        let clip = cam.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        // wgpu convention: depth inside [0, 1]
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn point_behind_camera_is_clipped() {
        let cam = Camera::new(800, 600);
        let clip = cam.view_proj() * Vec4::new(0.0, 0.0, 10.0, 1.0);
        // Behind the eye: w is negative in a right-handed projection.
        assert!(clip.w < 0.0);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let cam = Camera::new(800, 0);
        assert!(cam.aspect.is_finite());
    }
}
