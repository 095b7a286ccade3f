//! Mutable animation state shared between the frame tick and the controls

/// Whether the render loop is advancing the cube's rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    Spinning,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Gates rotation in the frame tick
    pub rotation_enabled: bool,
    /// Radians added to the X and Y angles per frame
    pub rotation_speed: f64,
    /// Camera distance from the orbit target, as last set by the zoom control
    pub zoom_distance: f32,
}

impl SceneState {
    pub fn new(rotation_speed: f64, zoom_distance: f32) -> Self {
        Self {
            rotation_enabled: true,
            rotation_speed,
            zoom_distance,
        }
    }

    pub fn mode(&self) -> RotationMode {
        if self.rotation_enabled {
            RotationMode::Spinning
        } else {
            RotationMode::Paused
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(0.01, 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_spins() {
        let state = SceneState::default();
        assert!(state.rotation_enabled);
        assert_eq!(state.mode(), RotationMode::Spinning);
        assert_eq!(state.zoom_distance, 5.0);
        assert_eq!(state.rotation_speed, 0.01);
    }

    #[test]
    fn test_mode_follows_flag() {
        let mut state = SceneState::default();
        state.rotation_enabled = false;
        assert_eq!(state.mode(), RotationMode::Paused);
    }
}
