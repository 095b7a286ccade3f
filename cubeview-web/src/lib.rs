//! cubeview web - WASM/WebGL2 host for the rotating cube
//!
//! The host page provides a `<canvas id="webgl-canvas">`, a container
//! `<div id="ui-controls">` for the start/stop buttons and an
//! `<input type="range" id="zoom-slider">`, then calls `launch()`.

use std::cell::RefCell;
use std::rc::Rc;

use cubeview_core::{resize, Scene, SceneConfig};
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod animation;
pub mod dom;
pub mod error;
pub mod gl;

pub use error::WebError;
pub use gl::WebGlSurface;

pub const CANVAS_ID: &str = "webgl-canvas";
pub const CONTROLS_ID: &str = "ui-controls";
pub const ZOOM_SLIDER_ID: &str = "zoom-slider";

/// Scene and drawing surface, shared by the frame loop and the DOM listeners
pub struct Viewer {
    pub scene: Scene,
    pub surface: WebGlSurface,
}

pub type SharedViewer = Rc<RefCell<Viewer>>;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    // A second init (hot reload) only fails because a logger is already set
    let _ = console_log::init_with_level(log::Level::Info);
    Ok(())
}

/// Build the scene and start rendering.
///
/// `config_json` is an optional JSON scene config; omitted fields keep their
/// defaults.
#[wasm_bindgen]
pub fn launch(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => SceneConfig::from_json(&json).map_err(WebError::from)?,
        None => SceneConfig::default(),
    };
    run(&config)?;
    Ok(())
}

fn run(config: &SceneConfig) -> Result<(), WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let canvas: HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;

    let viewport = dom::window_viewport(&window)?;
    let mut scene = Scene::new(config, viewport);
    let mut surface = WebGlSurface::new(canvas.clone(), &scene.cube.mesh)?;
    resize(&mut scene, &mut surface, viewport);

    let viewer: SharedViewer = Rc::new(RefCell::new(Viewer { scene, surface }));

    animation::start(viewer.clone())?;
    dom::bind_controls(&document, CONTROLS_ID, ZOOM_SLIDER_ID, viewer.clone())?;
    dom::bind_resize(&window, viewer.clone())?;
    dom::bind_orbit(&window, &canvas, viewer)?;

    info!("cubeview running at {}x{}", viewport.width, viewport.height);
    Ok(())
}
