/// Perspective camera and projection utilities
use log::debug;
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera.
///
/// Changing `fov_degrees`, `aspect`, `near` or `far` does not affect rendering
/// until [`PerspectiveCamera::update_projection_matrix`] is called; the
/// projection matrix is cached between updates.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    /// Unit viewing direction
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Point3::origin(),
            direction: -Vector3::z(),
            up: Vector3::y(),
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Recompute the cached projection from the current parameters.
    ///
    /// A degenerate frustum (zero or non-finite aspect, as from a collapsed
    /// window, or `near == far`) keeps the previous projection.
    pub fn update_projection_matrix(&mut self) {
        let aspect_ok = self.aspect.is_finite() && self.aspect > f32::EPSILON;
        if !aspect_ok || (self.far - self.near).abs() <= f32::EPSILON {
            debug!(
                "keeping projection for degenerate frustum: aspect {} near {} far {}",
                self.aspect, self.near, self.far
            );
            return;
        }
        self.projection =
            Matrix4::new_perspective(self.aspect, self.fov_degrees.to_radians(), self.near, self.far);
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// Place the camera at `position` looking towards `target`.
    ///
    /// When the two coincide the previous direction is kept.
    pub fn look_at(&mut self, position: Point3<f32>, target: Point3<f32>) {
        self.position = position;
        if let Some(direction) = (target - position).try_normalize(f32::EPSILON) {
            self.direction = direction;
        }
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &(self.position + self.direction), &self.up)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    /// Project a model-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with `x`/`y` in pixels from the top-left corner
    /// and `depth` the normalised device depth, or `None` when the point lies
    /// behind the camera or outside the near/far range. Points off the sides
    /// of the screen are still returned; the rasteriser clips them.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.view_projection() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = PerspectiveCamera::new(75.0, 800.0 / 600.0, 0.1, 1000.0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(camera.projection_matrix().norm() > 0.0);
    }

    #[test]
    fn test_projection_is_cached_until_update() {
        let mut camera = PerspectiveCamera::default();
        let before = *camera.projection_matrix();

        camera.set_aspect(2.0);
        assert_eq!(*camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(*camera.projection_matrix(), before);
        let expected = Matrix4::new_perspective(2.0, 75f32.to_radians(), 0.1, 1000.0);
        assert!((camera.projection_matrix() - expected).norm() < 1e-6);
    }

    #[test]
    fn test_degenerate_aspect_keeps_previous_projection() {
        let mut camera = PerspectiveCamera::default();
        let before = *camera.projection_matrix();

        for aspect in [0.0, f32::INFINITY, f32::NAN] {
            camera.set_aspect(aspect);
            camera.update_projection_matrix();
            assert_eq!(*camera.projection_matrix(), before);
        }

        camera.set_aspect(2.0);
        camera.update_projection_matrix();
        assert_ne!(*camera.projection_matrix(), before);
    }

    #[test]
    fn test_zero_width_camera_can_be_built() {
        let camera = PerspectiveCamera::new(75.0, 0.0, 0.1, 1000.0);
        assert_eq!(camera.aspect, 0.0);
        assert!(camera.projection_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut camera = PerspectiveCamera::default();
        camera.look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin());

        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_offscreen_point_is_kept_for_clipping() {
        let mut camera = PerspectiveCamera::default();
        camera.look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin());

        let (x, _, _) = camera
            .project_to_screen(&Point3::new(50.0, 0.0, 0.0), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!(x > 800.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let mut camera = PerspectiveCamera::default();
        camera.look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin());

        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_look_at_same_point_keeps_direction() {
        let mut camera = PerspectiveCamera::default();
        camera.look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin());
        let direction = camera.direction;

        camera.look_at(Point3::origin(), Point3::origin());
        assert_eq!(camera.direction, direction);
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
    }
}
