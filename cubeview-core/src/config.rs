/// Scene configuration.
///
/// Every field has a default, so a config file only needs the values it
/// overrides. Defaults reproduce the stock scene: a blue 2-unit cube tilted
/// 0.5 rad about X, lit by a white/grey hemisphere light, seen from 5 units.
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Color;
use crate::error::Result;
use crate::orbit::OrbitSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub rotation_enabled: bool,
    /// Radians per frame
    pub rotation_speed: f64,
    /// Initial camera distance
    pub zoom_distance: f32,
    pub camera: CameraConfig,
    pub cube: CubeConfig,
    pub light: LightConfig,
    pub background: Color,
    pub orbit: OrbitSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub size: f32,
    pub color: Color,
    /// Initial Euler angles (XYZ, radians)
    pub rotation: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rotation_enabled: true,
            rotation_speed: 0.01,
            zoom_distance: 5.0,
            camera: CameraConfig::default(),
            cube: CubeConfig::default(),
            light: LightConfig::default(),
            background: Color::from_hex(0x161718),
            orbit: OrbitSettings::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 2.0,
            color: Color::from_hex(0x0000ff),
            rotation: [0.5, 0.0, 0.0],
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            sky: Color::from_hex(0xffffff),
            ground: Color::from_hex(0x757575),
            intensity: 1.3,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SceneConfig::from_json(
            r##"{ "rotation_speed": 0.05, "cube": { "color": "red" }, "background": "#000" }"##,
        )
        .unwrap();
        assert_eq!(config.rotation_speed, 0.05);
        assert_eq!(config.cube.color.to_rgb8(), (255, 0, 0));
        assert_eq!(config.cube.size, 2.0);
        assert_eq!(config.background.to_rgb8(), (0, 0, 0));
        assert_eq!(config.zoom_distance, 5.0);
    }

    #[test]
    fn test_bad_color_is_a_config_error() {
        let err = SceneConfig::from_json(r#"{ "background": "nope" }"#).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_json_round_trip_keeps_colors() {
        let json = SceneConfig::default().to_json().unwrap();
        assert!(json.contains("#161718"));
        assert_eq!(SceneConfig::from_json(&json).unwrap(), SceneConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::from_path("/nonexistent/cubeview.json").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
