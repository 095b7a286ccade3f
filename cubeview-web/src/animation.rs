/// `requestAnimationFrame` driven render loop
use std::cell::RefCell;
use std::rc::Rc;

use cubeview_core::{tick, FrameScheduler};
use log::error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::WebError;
use crate::{SharedViewer, Viewer};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the stored frame callback on the next display refresh
pub struct AnimationFrameScheduler {
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    fn try_request(&self) -> Result<(), WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let callback = self.callback.borrow();
        if let Some(callback) = callback.as_ref() {
            window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        if let Err(err) = self.try_request() {
            error!("requestAnimationFrame failed: {err}");
        }
    }
}

/// Start the render loop. It runs for the lifetime of the page.
pub fn start(viewer: SharedViewer) -> Result<(), WebError> {
    // The callback reschedules itself, so it has to be reachable from inside
    // its own body; the Option lets us build the closure first.
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let mut scheduler = AnimationFrameScheduler {
        callback: callback.clone(),
    };

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut viewer = viewer.borrow_mut();
        let Viewer { scene, surface } = &mut *viewer;
        if let Err(err) = tick(scene, &mut scheduler, surface) {
            error!("frame {} failed to draw: {err}", scene.frame());
        }
    }) as Box<dyn FnMut()>));

    AnimationFrameScheduler { callback }.try_request()
}
