/// The single-cube scene: object, camera, controls, light and animation state
use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};

use crate::camera::PerspectiveCamera;
use crate::color::Color;
use crate::config::{LightConfig, SceneConfig};
use crate::geometry::Mesh;
use crate::orbit::OrbitControls;
use crate::state::SceneState;
use crate::transform::{Euler, Transform};
use crate::viewport::Viewport;

/// Light blended between a sky colour (from above) and a ground colour (from below)
#[derive(Debug, Clone, PartialEq)]
pub struct HemisphereLight {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
}

impl HemisphereLight {
    /// Incoming light for a world-space unit normal
    pub fn irradiance(&self, normal: &Vector3<f32>) -> Color {
        let weight = 0.5 * normal.y + 0.5;
        self.ground.lerp(self.sky, weight).scale(self.intensity)
    }
}

impl From<&LightConfig> for HemisphereLight {
    fn from(config: &LightConfig) -> Self {
        Self {
            sky: config.sky,
            ground: config.ground,
            intensity: config.intensity,
        }
    }
}

/// The rendered box
#[derive(Debug, Clone)]
pub struct Cube {
    pub mesh: Mesh,
    pub transform: Transform,
    pub color: Color,
}

impl Cube {
    /// Shaded colour of a face with the given model-space normal
    pub fn shade(&self, normal: &Vector3<f32>, light: &HemisphereLight) -> Color {
        let world = (self.transform.normal_matrix() * normal).normalize();
        self.color.modulate(light.irradiance(&world))
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub state: SceneState,
    pub cube: Cube,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub light: HemisphereLight,
    pub background: Color,
    frame: u64,
}

impl Scene {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        let mut camera = PerspectiveCamera::new(
            config.camera.fov,
            viewport.aspect(),
            config.camera.near,
            config.camera.far,
        );
        camera.look_at(Point3::new(0.0, 0.0, config.zoom_distance), Point3::origin());
        let controls = OrbitControls::new(&camera, Point3::origin(), config.orbit.clone());

        let mut state = SceneState::new(config.rotation_speed, config.zoom_distance);
        state.rotation_enabled = config.rotation_enabled;

        let cube = Cube {
            mesh: Mesh::cube(config.cube.size),
            transform: Transform::new().with_rotation(Euler::from(config.cube.rotation)),
            color: config.cube.color,
        };

        info!(
            "scene ready: {}x{} viewport, camera at distance {}",
            viewport.width, viewport.height, config.zoom_distance
        );

        Self {
            state,
            cube,
            camera,
            controls,
            light: HemisphereLight::from(&config.light),
            background: config.background,
            frame: 0,
        }
    }

    /// Number of completed frame ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rotation(&self) -> Euler {
        self.cube.transform.rotation
    }

    /// Advance the animation by one frame
    pub fn advance(&mut self) {
        if self.state.rotation_enabled {
            let speed = self.state.rotation_speed;
            self.cube.transform.rotation.rotate(speed, speed, 0.0);
        }
        self.frame += 1;
    }

    pub fn start_rotation(&mut self) {
        if !self.state.rotation_enabled {
            debug!("rotation started at frame {}", self.frame);
        }
        self.state.rotation_enabled = true;
    }

    pub fn stop_rotation(&mut self) {
        if self.state.rotation_enabled {
            debug!("rotation stopped at frame {}", self.frame);
        }
        self.state.rotation_enabled = false;
    }

    /// Set the camera distance from the orbit target
    pub fn set_zoom_distance(&mut self, distance: f32) {
        if !distance.is_finite() {
            warn!("ignoring non-finite zoom distance {distance}");
            return;
        }
        self.state.zoom_distance = distance;
        self.controls.set_distance(distance, &mut self.camera);
        debug!("zoom distance set to {distance}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(&SceneConfig::default(), Viewport::new(800, 600))
    }

    #[test]
    fn test_initial_scene_matches_config() {
        let scene = scene();
        assert!(scene.state.rotation_enabled);
        assert_eq!(scene.state.zoom_distance, 5.0);
        assert_eq!(scene.rotation(), Euler::new(0.5, 0.0, 0.0));
        assert!((scene.camera.position - Point3::new(0.0, 0.0, 5.0)).norm() < 1e-6);
        assert!((scene.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(scene.frame(), 0);
    }

    #[test]
    fn test_advance_only_when_enabled() {
        let mut scene = scene();
        scene.advance();
        assert!((scene.rotation().x - 0.51).abs() < 1e-6);
        assert!((scene.rotation().y - 0.01).abs() < 1e-6);

        scene.stop_rotation();
        let frozen = scene.rotation();
        scene.advance();
        assert_eq!(scene.rotation(), frozen);
        assert_eq!(scene.frame(), 2);
    }

    #[test]
    fn test_zoom_moves_camera() {
        let mut scene = scene();
        scene.set_zoom_distance(8.0);
        assert_eq!(scene.state.zoom_distance, 8.0);
        assert!((scene.camera.position.z - 8.0).abs() < 1e-5);

        scene.set_zoom_distance(f32::NAN);
        assert_eq!(scene.state.zoom_distance, 8.0);
    }

    #[test]
    fn test_hemisphere_light_blend() {
        let light = HemisphereLight::from(&LightConfig::default());
        let up = light.irradiance(&Vector3::y());
        let down = light.irradiance(&-Vector3::y());
        assert!((up.r - 1.3).abs() < 1e-6);
        assert!((down.r - 1.3 * 0x75 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_top_face_is_brighter_than_bottom() {
        let mut scene = scene();
        scene.cube.transform.rotation = Euler::zero();
        let top = scene.cube.shade(&Vector3::y(), &scene.light);
        let bottom = scene.cube.shade(&-Vector3::y(), &scene.light);
        assert!(top.luminance() > bottom.luminance());
    }
}
