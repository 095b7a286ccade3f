/// Host capabilities and the per-frame tick.
///
/// A host (browser page, terminal) provides a [`DrawSurface`] that turns the
/// scene into pixels and a [`FrameScheduler`] that arranges for [`tick`] to be
/// called again on the next display refresh.
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Something the scene can be drawn onto
pub trait DrawSurface {
    type Error;

    /// Resize the backing buffer to the viewport
    fn set_size(&mut self, viewport: Viewport);

    /// Draw the scene as it stands
    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}

/// The host's animation-scheduling primitive
pub trait FrameScheduler {
    /// Arrange for one more tick
    fn request_frame(&mut self);
}

/// Run one frame: advance rotation, schedule the next frame, draw.
///
/// Draw errors are returned to the host untouched; the next frame has already
/// been requested by then.
pub fn tick<F, S>(scene: &mut Scene, scheduler: &mut F, surface: &mut S) -> Result<(), S::Error>
where
    F: FrameScheduler + ?Sized,
    S: DrawSurface + ?Sized,
{
    scene.advance();
    scheduler.request_frame();
    surface.draw(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::testing::{CountingScheduler, RecordingSurface};
    use crate::transform::Euler;

    fn setup() -> (Scene, CountingScheduler, RecordingSurface) {
        let mut config = SceneConfig::default();
        config.cube.rotation = [0.0, 0.0, 0.0];
        let viewport = Viewport::new(800, 600);
        (
            Scene::new(&config, viewport),
            CountingScheduler::default(),
            RecordingSurface::new(viewport),
        )
    }

    #[test]
    fn test_ten_frames_at_default_speed() {
        let (mut scene, mut scheduler, mut surface) = setup();
        for _ in 0..10 {
            tick(&mut scene, &mut scheduler, &mut surface).unwrap();
        }

        let rotation = scene.rotation();
        assert!((rotation.x - 0.1).abs() < 1e-6);
        assert!((rotation.y - 0.1).abs() < 1e-6);
        assert_eq!(rotation.z, 0.0);
        assert_eq!(scheduler.requests, 10);
        assert_eq!(surface.draws, 10);
    }

    #[test]
    fn test_each_frame_adds_exactly_the_speed() {
        let (mut scene, mut scheduler, mut surface) = setup();
        scene.state.rotation_speed = 0.25;
        for frame in 1..=4 {
            tick(&mut scene, &mut scheduler, &mut surface).unwrap();
            let expected = 0.25 * frame as f64;
            assert_eq!(scene.rotation(), Euler::new(expected, expected, 0.0));
        }
    }

    #[test]
    fn test_speed_is_exact_after_a_long_run() {
        let (mut scene, mut scheduler, mut surface) = setup();
        scene.cube.transform.rotation = Euler::new(10_000.0, 10_000.0, 0.0);
        let before = scene.rotation();

        tick(&mut scene, &mut scheduler, &mut surface).unwrap();

        let after = scene.rotation();
        assert!((after.x - before.x - 0.01).abs() < 1e-9);
        assert!((after.y - before.y - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_paused_frames_still_draw_and_reschedule() {
        let (mut scene, mut scheduler, mut surface) = setup();
        scene.stop_rotation();
        for _ in 0..3 {
            tick(&mut scene, &mut scheduler, &mut surface).unwrap();
        }
        assert_eq!(scene.rotation(), Euler::zero());
        assert_eq!(scheduler.requests, 3);
        assert_eq!(surface.draws, 3);
        assert_eq!(surface.last_rotation, Some(Euler::zero()));
    }

    #[test]
    fn test_draw_failure_is_returned_after_rescheduling() {
        let (mut scene, mut scheduler, mut surface) = setup();
        surface.fail_next = true;

        let result = tick(&mut scene, &mut scheduler, &mut surface);
        assert_eq!(result, Err("draw failed"));
        assert_eq!(scheduler.requests, 1);
        assert!(scene.rotation().x > 0.0);
    }
}
