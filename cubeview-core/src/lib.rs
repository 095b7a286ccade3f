//! cubeview core - host-independent scene for the rotating cube viewer
//!
//! Holds the animation state, the per-frame tick, the user controls, the
//! resize responder, and the small amount of camera and geometry code the
//! renderers need. Hosts plug in through the [`DrawSurface`] and
//! [`FrameScheduler`] traits.

pub mod camera;
pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod orbit;
pub mod scene;
pub mod state;
pub mod transform;
pub mod viewport;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use camera::PerspectiveCamera;
pub use color::Color;
pub use config::SceneConfig;
pub use controls::{apply, ControlEvent};
pub use error::{Error, Result};
pub use frame::{tick, DrawSurface, FrameScheduler};
pub use geometry::{Mesh, Triangle, Vertex};
pub use orbit::{OrbitControls, OrbitSettings, PointerButton};
pub use scene::{Cube, HemisphereLight, Scene};
pub use state::{RotationMode, SceneState};
pub use transform::{Euler, Transform};
pub use viewport::{resize, Viewport};
