/// Terminal host for the rotating cube: ASCII rendering, keyboard controls,
/// mouse orbiting and resize handling on top of `cubeview-core`.
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, terminal,
};
use cubeview_core::{apply, resize, tick, FrameScheduler, RotationMode, Scene, SceneConfig};
use log::{debug, info};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

pub mod cli;
pub mod error;
pub mod input;
pub mod renderer;

pub use error::TerminalError;
pub use renderer::{terminal_viewport, AsciiRenderer, TerminalSurface};

use input::{action_for_key, pointer_for_mouse, Action, Pointer, ZoomSlider};

/// Records frame requests; the main loop ticks once per request
#[derive(Debug, Default)]
pub struct FrameRequests {
    pending: bool,
}

impl FrameRequests {
    /// Consume the pending request, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameRequests {
    fn request_frame(&mut self) {
        self.pending = true;
    }
}

/// Leave the alternate screen and raw mode; raw mode is dropped even when
/// writing the escape sequences fails
fn restore_terminal<W: Write>(
    out: &mut W,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let screen = execute!(out, cursor::Show, DisableMouseCapture, terminal::LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen.and(raw)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    surface: TerminalSurface<Stdout>,
    frames: FrameRequests,
    slider: ZoomSlider,
    frame_time: Duration,
    running: bool,
    last_fps_sample: Instant,
    frames_since_sample: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &SceneConfig, frame_time: Duration) -> Result<Self, TerminalError> {
        let (cols, rows) = terminal::size()?;
        let viewport = terminal_viewport(cols, rows);
        let scene = Scene::new(config, viewport);
        let slider = ZoomSlider::for_distance(scene.state.zoom_distance);

        Ok(Self {
            scene,
            surface: TerminalSurface::new(stdout(), viewport),
            frames: FrameRequests::default(),
            slider,
            frame_time,
            running: true,
            last_fps_sample: Instant::now(),
            frames_since_sample: 0,
            fps: 0.0,
        })
    }

    pub fn frames_drawn(&self) -> u64 {
        self.scene.frame()
    }

    pub fn run(&mut self) -> Result<(), TerminalError> {
        terminal::enable_raw_mode()?;
        let result = execute!(
            self.surface.writer_mut(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .map_err(TerminalError::from)
        .and_then(|()| self.main_loop());

        // The loop's own error wins over a cleanup error
        let restored = restore_terminal(self.surface.writer_mut(), terminal::disable_raw_mode);
        result.and(restored.map_err(TerminalError::from))
    }

    fn main_loop(&mut self) -> Result<(), TerminalError> {
        info!("terminal viewer started");
        self.frames.request_frame();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            if self.frames.take() {
                self.surface.status = self.status_line();
                tick(&mut self.scene, &mut self.frames, &mut self.surface)?;
                self.frames_since_sample += 1;
            }

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let since = self.last_fps_sample.elapsed();
            if since >= Duration::from_secs(1) {
                self.fps = self.frames_since_sample as f32 / since.as_secs_f32();
                self.frames_since_sample = 0;
                self.last_fps_sample = Instant::now();
            }
        }

        info!("terminal viewer stopped after {} frames", self.scene.frame());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => match action_for_key(key, &mut self.slider) {
                Some(Action::Quit) => self.running = false,
                Some(Action::Control(control)) => apply(&mut self.scene, control),
                None => {}
            },
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_for_mouse(mouse) {
                    self.handle_pointer(pointer);
                }
            }
            Event::Resize(cols, rows) => {
                debug!("terminal resized to {cols}x{rows}");
                resize(&mut self.scene, &mut self.surface, terminal_viewport(cols, rows));
            }
            _ => {}
        }
    }

    fn handle_pointer(&mut self, pointer: Pointer) {
        let height = self.surface.renderer().dimensions().1 as u32 * renderer::CELL_ASPECT;
        let scene = &mut self.scene;
        match pointer {
            Pointer::Down(button, x, y) => scene.controls.pointer_down(button, x, y),
            Pointer::Move(x, y) => scene.controls.pointer_move(x, y, height, &mut scene.camera),
            Pointer::Up => scene.controls.pointer_up(),
            Pointer::Wheel(delta) => scene.controls.wheel(delta, &mut scene.camera),
        }
    }

    fn status_line(&self) -> String {
        let mode = match self.scene.state.mode() {
            RotationMode::Spinning => "spinning",
            RotationMode::Paused => "paused",
        };
        format!(
            "cubeview | {mode} | zoom {:.1} | FPS: {:.1} | s=start x=stop +/-=zoom drag=orbit q=quit",
            self.scene.state.zoom_distance, self.fps
        )
    }
}
