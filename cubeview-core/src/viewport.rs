/// Viewport dimensions and the resize responder
use log::debug;

use crate::frame::DrawSurface;
use crate::scene::Scene;

/// Drawing-surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; zero for a zero-width and infinite for a zero-height viewport
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Match the camera and the drawing surface to a new viewport size
pub fn resize<S>(scene: &mut Scene, surface: &mut S, viewport: Viewport)
where
    S: DrawSurface + ?Sized,
{
    debug!("resize to {}x{}", viewport.width, viewport.height);
    scene.camera.set_aspect(viewport.aspect());
    scene.camera.update_projection_matrix();
    surface.set_size(viewport);
}
