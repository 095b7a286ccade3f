/// DOM wiring: control buttons, zoom slider, window resize and orbit pointer input
use cubeview_core::controls::slider_for_zoom_distance;
use cubeview_core::{apply, resize, ControlEvent, PointerButton, Viewport};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlCanvasElement, HtmlInputElement, MouseEvent, WheelEvent, Window};

use crate::error::WebError;
use crate::SharedViewer;

/// Look up an element by id and cast it to the expected type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, WebError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongElement {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// Current inner size of the browser window
pub fn window_viewport(window: &Window) -> Result<Viewport, WebError> {
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    Ok(Viewport::new(width as u32, height as u32))
}

/// Register a listener that lives as long as the page
fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), WebError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn add_button(
    document: &Document,
    container: &Element,
    label: &str,
    viewer: SharedViewer,
    event: ControlEvent,
) -> Result<(), WebError> {
    let button = document.create_element("button")?;
    button.set_text_content(Some(label));
    listen(&button, "click", move |_: Event| {
        apply(&mut viewer.borrow_mut().scene, event);
    })?;
    container.append_child(&button)?;
    Ok(())
}

/// Inject the start/stop buttons and hook up the zoom slider
pub fn bind_controls(
    document: &Document,
    container_id: &str,
    slider_id: &str,
    viewer: SharedViewer,
) -> Result<(), WebError> {
    let container: Element = element_by_id(document, container_id)?;
    add_button(
        document,
        &container,
        "Start Rotation",
        viewer.clone(),
        ControlEvent::StartRotation,
    )?;
    add_button(
        document,
        &container,
        "Stop Rotation",
        viewer.clone(),
        ControlEvent::StopRotation,
    )?;

    let slider: HtmlInputElement = element_by_id(document, slider_id)?;
    // Put the thumb where the camera already is
    let zoom = viewer.borrow().scene.state.zoom_distance;
    slider.set_value_as_number(f64::from(slider_for_zoom_distance(zoom)));

    let input = slider.clone();
    listen(&slider, "input", move |_: Event| {
        let value = input.value_as_number() as f32;
        apply(&mut viewer.borrow_mut().scene, ControlEvent::Zoom(value));
    })?;

    debug!("controls bound to #{container_id} and #{slider_id}");
    Ok(())
}

/// Keep camera aspect and canvas size in step with the window
pub fn bind_resize(window: &Window, viewer: SharedViewer) -> Result<(), WebError> {
    let source = window.clone();
    listen(window, "resize", move |_: Event| match window_viewport(&source) {
        Ok(viewport) => {
            let mut viewer = viewer.borrow_mut();
            let crate::Viewer { scene, surface } = &mut *viewer;
            resize(scene, surface, viewport);
        }
        Err(err) => warn!("could not read window size: {err}"),
    })
}

fn pointer_button(event: &MouseEvent) -> Option<PointerButton> {
    match event.button() {
        0 => Some(PointerButton::Primary),
        1 => Some(PointerButton::Middle),
        2 => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Mouse drag orbits, wheel zooms, right drag pans
pub fn bind_orbit(
    window: &Window,
    canvas: &HtmlCanvasElement,
    viewer: SharedViewer,
) -> Result<(), WebError> {
    {
        let viewer = viewer.clone();
        listen(canvas, "mousedown", move |event: MouseEvent| {
            if let Some(button) = pointer_button(&event) {
                event.prevent_default();
                viewer.borrow_mut().scene.controls.pointer_down(
                    button,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
            }
        })?;
    }

    // Tracked on the window so a drag survives leaving the canvas
    {
        let viewer = viewer.clone();
        listen(window, "mousemove", move |event: MouseEvent| {
            let mut viewer = viewer.borrow_mut();
            let height = viewer.surface.size().height;
            let scene = &mut viewer.scene;
            if scene.controls.is_dragging() {
                scene.controls.pointer_move(
                    event.client_x() as f32,
                    event.client_y() as f32,
                    height,
                    &mut scene.camera,
                );
            }
        })?;
    }

    {
        let viewer = viewer.clone();
        listen(window, "mouseup", move |_: MouseEvent| {
            viewer.borrow_mut().scene.controls.pointer_up();
        })?;
    }

    listen(canvas, "wheel", move |event: WheelEvent| {
        event.prevent_default();
        let mut viewer = viewer.borrow_mut();
        let scene = &mut viewer.scene;
        scene.controls.wheel(event.delta_y() as f32, &mut scene.camera);
    })?;

    listen(canvas, "contextmenu", |event: Event| event.prevent_default())
}
