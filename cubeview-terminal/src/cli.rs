/// Command-line options for the terminal viewer
use clap::Parser;
use cubeview_core::SceneConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "cubeview-terminal", version, about = "Rotating cube in the terminal")]
pub struct Args {
    /// JSON scene config; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rotation speed in radians per frame
    #[arg(long)]
    pub speed: Option<f64>,

    /// Initial camera distance
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Start with rotation stopped
    #[arg(long)]
    pub paused: bool,

    /// Print the effective scene config as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,
}

impl Args {
    pub fn scene_config(&self) -> cubeview_core::Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::from_path(path)?,
            None => SceneConfig::default(),
        };
        if let Some(speed) = self.speed {
            config.rotation_speed = speed;
        }
        if let Some(zoom) = self.zoom {
            config.zoom_distance = zoom;
        }
        if self.paused {
            config.rotation_enabled = false;
        }
        Ok(config)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}
