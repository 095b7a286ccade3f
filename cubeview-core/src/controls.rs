/// User controls: start/stop buttons and the zoom slider
use crate::scene::Scene;

/// Camera distance when the zoom slider sits at 0
pub const ZOOM_BASE: f32 = 10.0;

/// Slider units per unit of camera distance
pub const ZOOM_SLIDER_DIVISOR: f32 = 10.0;

/// Map a zoom slider value to a camera distance.
///
/// Linear and decreasing: 0 gives [`ZOOM_BASE`], 100 gives 0. Values outside
/// the slider's nominal 0..=100 range are mapped by the same formula.
pub fn zoom_distance_for_slider(value: f32) -> f32 {
    ZOOM_BASE - value / ZOOM_SLIDER_DIVISOR
}

/// Inverse of [`zoom_distance_for_slider`], for placing a slider thumb
pub fn slider_for_zoom_distance(distance: f32) -> f32 {
    (ZOOM_BASE - distance) * ZOOM_SLIDER_DIVISOR
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    StartRotation,
    StopRotation,
    /// Raw slider value
    Zoom(f32),
}

/// Apply a control event to the scene
pub fn apply(scene: &mut Scene, event: ControlEvent) {
    match event {
        ControlEvent::StartRotation => scene.start_rotation(),
        ControlEvent::StopRotation => scene.stop_rotation(),
        ControlEvent::Zoom(value) => scene.set_zoom_distance(zoom_distance_for_slider(value)),
    }
}
