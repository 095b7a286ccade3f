//! Recording fakes of the host capabilities for unit tests
use crate::frame::{DrawSurface, FrameScheduler};
use crate::scene::Scene;
use crate::transform::Euler;
use crate::viewport::Viewport;

#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub requests: usize,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub size: Viewport,
    pub resizes: usize,
    pub draws: usize,
    pub last_rotation: Option<Euler>,
    pub fail_next: bool,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            resizes: 0,
            draws: 0,
            last_rotation: None,
            fail_next: false,
        }
    }
}

impl DrawSurface for RecordingSurface {
    type Error = &'static str;

    fn set_size(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.resizes += 1;
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_next) {
            return Err("draw failed");
        }
        self.draws += 1;
        self.last_rotation = Some(scene.rotation());
        Ok(())
    }
}
