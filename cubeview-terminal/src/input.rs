/// Keyboard and mouse bindings for the terminal viewer
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use cubeview_core::controls::slider_for_zoom_distance;
use cubeview_core::{ControlEvent, PointerButton};

use crate::renderer::CELL_ASPECT;

/// Slider units moved per `+`/`-` press
pub const SLIDER_STEP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Control(ControlEvent),
    Quit,
}

/// Keyboard stand-in for the browser's range input, kept within 0..=100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSlider {
    value: f32,
}

impl ZoomSlider {
    /// Slider positioned to match an existing camera distance
    pub fn for_distance(distance: f32) -> Self {
        Self {
            value: slider_for_zoom_distance(distance).clamp(0.0, 100.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    fn step(&mut self, delta: f32) -> f32 {
        self.value = (self.value + delta).clamp(0.0, 100.0);
        self.value
    }
}

/// Map a key press to an action, moving the slider for zoom keys
pub fn action_for_key(key: KeyEvent, slider: &mut ZoomSlider) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') => Some(Action::Control(ControlEvent::StartRotation)),
        KeyCode::Char('x') => Some(Action::Control(ControlEvent::StopRotation)),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(Action::Control(ControlEvent::Zoom(slider.step(SLIDER_STEP))))
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            Some(Action::Control(ControlEvent::Zoom(slider.step(-SLIDER_STEP))))
        }
        _ => None,
    }
}

/// Pointer input in scene pixels, mirroring what the browser host receives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    Down(PointerButton, f32, f32),
    Move(f32, f32),
    Up,
    Wheel(f32),
}

/// Translate a terminal mouse event; rows are scaled to match the viewport
pub fn pointer_for_mouse(mouse: MouseEvent) -> Option<Pointer> {
    let x = f32::from(mouse.column);
    let y = f32::from(mouse.row) * CELL_ASPECT as f32;
    let button = |button: MouseButton| match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Secondary,
    };
    match mouse.kind {
        MouseEventKind::Down(b) => Some(Pointer::Down(button(b), x, y)),
        MouseEventKind::Drag(_) => Some(Pointer::Move(x, y)),
        MouseEventKind::Up(_) => Some(Pointer::Up),
        MouseEventKind::ScrollUp => Some(Pointer::Wheel(-1.0)),
        MouseEventKind::ScrollDown => Some(Pointer::Wheel(1.0)),
        _ => None,
    }
}
