/// Orbit camera controller: drag to orbit, wheel to zoom, right-drag to pan.
///
/// The controller keeps the camera on a sphere around `target`, described by a
/// radius, an azimuth `theta` measured around +Y from +Z, and a polar angle
/// `phi` measured down from +Y. Every change is written straight into the
/// camera passed in, so the camera pose is always current.
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::camera::PerspectiveCamera;

/// Keeps `phi` away from the poles where the view basis degenerates
const POLE_EPSILON: f32 = 1e-4;

/// Per-notch wheel scale at `zoom_speed = 1`
const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    /// `None` means unbounded
    pub max_distance: Option<f32>,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    Rotate { x: f32, y: f32 },
    Dolly { y: f32 },
    Pan { x: f32, y: f32 },
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub settings: OrbitSettings,
    radius: f32,
    theta: f32,
    phi: f32,
    drag: Drag,
}

impl OrbitControls {
    /// Adopt the camera's current position relative to `target`
    pub fn new(camera: &PerspectiveCamera, target: Point3<f32>, settings: OrbitSettings) -> Self {
        let offset = camera.position - target;
        let radius = offset.norm();
        let (theta, phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            settings,
            radius,
            theta,
            phi: phi.clamp(POLE_EPSILON, PI - POLE_EPSILON),
            drag: Drag::Idle,
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    #[cfg(test)]
    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    #[cfg(test)]
    pub fn polar(&self) -> f32 {
        self.phi
    }

    /// Unit vector from the target towards the camera
    fn offset_direction(&self) -> Vector3<f32> {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vector3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Write the current pose into the camera
    pub fn sync(&self, camera: &mut PerspectiveCamera) {
        let direction = self.offset_direction();
        camera.position = self.target + direction * self.radius;
        camera.direction = -direction;
    }

    /// Set the orbit radius directly, ignoring the distance limits
    pub fn set_distance(&mut self, distance: f32, camera: &mut PerspectiveCamera) {
        self.radius = distance;
        self.sync(camera);
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        let max = self.settings.max_distance.unwrap_or(f32::INFINITY);
        distance.max(self.settings.min_distance).min(max)
    }

    /// Orbit by a pointer delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: u32, camera: &mut PerspectiveCamera) {
        if !self.settings.enable_rotate || viewport_height == 0 {
            return;
        }
        let height = viewport_height as f32;
        self.theta -= TAU * dx / height * self.settings.rotate_speed;
        self.phi = (self.phi - TAU * dy / height * self.settings.rotate_speed)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.sync(camera);
    }

    /// Multiply the radius by `scale`, honouring the distance limits
    pub fn dolly(&mut self, scale: f32, camera: &mut PerspectiveCamera) {
        if !self.settings.enable_zoom {
            return;
        }
        self.radius = self.clamp_distance(self.radius * scale);
        self.sync(camera);
    }

    fn zoom_scale(&self) -> f32 {
        ZOOM_STEP.powf(self.settings.zoom_speed)
    }

    /// Negative `delta_y` (wheel up) moves the camera closer
    pub fn wheel(&mut self, delta_y: f32, camera: &mut PerspectiveCamera) {
        if delta_y < 0.0 {
            self.dolly(self.zoom_scale(), camera);
        } else if delta_y > 0.0 {
            self.dolly(1.0 / self.zoom_scale(), camera);
        }
    }

    /// Move target and camera together so the scene follows the pointer
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: u32, camera: &mut PerspectiveCamera) {
        if !self.settings.enable_pan || viewport_height == 0 {
            return;
        }
        let Some(right) = camera.direction.cross(&camera.up).try_normalize(f32::EPSILON) else {
            return;
        };
        let screen_up = right.cross(&camera.direction);

        // World units covered by one pixel at the target's depth
        let half_fov = (camera.fov_degrees / 2.0).to_radians();
        let span = 2.0 * self.radius * half_fov.tan() / viewport_height as f32;
        let speed = self.settings.pan_speed;

        let offset = -right * (dx * span * speed) + screen_up * (dy * span * speed);
        self.target += offset;
        self.sync(camera);
    }

    pub fn pointer_down(&mut self, button: PointerButton, x: f32, y: f32) {
        self.drag = match button {
            PointerButton::Primary => Drag::Rotate { x, y },
            PointerButton::Middle => Drag::Dolly { y },
            PointerButton::Secondary => Drag::Pan { x, y },
        };
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: u32, camera: &mut PerspectiveCamera) {
        match self.drag {
            Drag::Idle => {}
            Drag::Rotate { x: last_x, y: last_y } => {
                self.rotate(x - last_x, y - last_y, viewport_height, camera);
                self.drag = Drag::Rotate { x, y };
            }
            Drag::Dolly { y: last_y } => {
                let dy = y - last_y;
                if dy < 0.0 {
                    self.dolly(self.zoom_scale(), camera);
                } else if dy > 0.0 {
                    self.dolly(1.0 / self.zoom_scale(), camera);
                }
                self.drag = Drag::Dolly { y };
            }
            Drag::Pan { x: last_x, y: last_y } => {
                self.pan(x - last_x, y - last_y, viewport_height, camera);
                self.drag = Drag::Pan { x, y };
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = Drag::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PerspectiveCamera, OrbitControls) {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin());
        let controls = OrbitControls::new(&camera, Point3::origin(), OrbitSettings::default());
        (camera, controls)
    }

    #[test]
    fn test_adopts_camera_position() {
        let (mut camera, controls) = setup();
        assert!((controls.distance() - 5.0).abs() < 1e-6);
        assert!(controls.azimuth().abs() < 1e-6);
        assert!((controls.polar() - PI / 2.0).abs() < 1e-6);

        controls.sync(&mut camera);
        assert!((camera.position - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-5);
    }

    #[test]
    fn test_drag_orbits_at_constant_radius() {
        let (mut camera, mut controls) = setup();
        controls.pointer_down(PointerButton::Primary, 100.0, 100.0);
        controls.pointer_move(160.0, 80.0, 600, &mut camera);
        controls.pointer_up();

        assert!(!controls.is_dragging());
        assert!(controls.azimuth() < 0.0);
        assert!((camera.position.coords.norm() - 5.0).abs() < 1e-4);
        // Still looking at the target
        let to_target = (Point3::origin() - camera.position).normalize();
        assert!((to_target - camera.direction).norm() < 1e-4);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let (mut camera, mut controls) = setup();
        controls.rotate(0.0, 10_000.0, 600, &mut camera);
        assert!(controls.polar() >= POLE_EPSILON);
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_wheel_zoom_direction_and_limits() {
        let (mut camera, mut controls) = setup();
        controls.settings.min_distance = 4.9;
        controls.settings.max_distance = Some(5.2);

        controls.wheel(-120.0, &mut camera);
        assert!((controls.distance() - 4.9).abs() < 1e-6);

        controls.wheel(120.0, &mut camera);
        controls.wheel(120.0, &mut camera);
        assert!((controls.distance() - 5.2).abs() < 1e-6);
        assert!((camera.position.z - 5.2).abs() < 1e-4);
    }

    #[test]
    fn test_set_distance_bypasses_limits() {
        let (mut camera, mut controls) = setup();
        controls.settings.min_distance = 1.0;
        controls.set_distance(0.0, &mut camera);
        assert_eq!(controls.distance(), 0.0);
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let (mut camera, mut controls) = setup();
        controls.pointer_down(PointerButton::Secondary, 0.0, 0.0);
        controls.pointer_move(50.0, 0.0, 600, &mut camera);

        // Dragging right shifts the target to the left
        assert!(controls.target.x < 0.0);
        assert!(controls.target.y.abs() < 1e-6);
        assert!((camera.position.x - controls.target.x).abs() < 1e-5);
        assert!((controls.distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_rotation_is_ignored() {
        let (mut camera, mut controls) = setup();
        controls.settings.enable_rotate = false;
        controls.rotate(100.0, 100.0, 600, &mut camera);
        assert_eq!(controls.azimuth(), 0.0);
    }
}
