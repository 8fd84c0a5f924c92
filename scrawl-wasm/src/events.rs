//! DOM mouse/touch events → [`InputEvent`].

use scrawl_core::{InputEvent, PixelPoint};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, HtmlCanvasElement, MouseEvent, TouchEvent};

/// DOM events listened to on the canvas.
const MOUSE_EVENTS: [&str; 4] = ["mousedown", "mousemove", "mouseup", "mouseleave"];
const TOUCH_EVENTS: [&str; 4] = ["touchstart", "touchmove", "touchend", "touchcancel"];

pub fn from_mouse(kind: &str, event: &MouseEvent) -> Option<InputEvent> {
    let point = PixelPoint::new(event.offset_x() as f64, event.offset_y() as f64);
    match kind {
        "mousedown" => Some(InputEvent::PointerDown(point)),
        "mousemove" => Some(InputEvent::PointerMove(point)),
        "mouseup" => Some(InputEvent::PointerUp),
        "mouseleave" => Some(InputEvent::PointerLeave),
        _ => None,
    }
}

pub fn from_touch(kind: &str, event: &TouchEvent, target: &Element) -> Option<InputEvent> {
    let rect = target.get_bounding_client_rect();
    let list = event.touches();
    let touches: Vec<PixelPoint> = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| PixelPoint::new(t.client_x() as f64 - rect.left(), t.client_y() as f64 - rect.top()))
        .collect();

    match kind {
        "touchstart" => Some(InputEvent::TouchStart(touches)),
        "touchmove" => Some(InputEvent::TouchMove(touches)),
        "touchend" => Some(InputEvent::TouchEnd),
        "touchcancel" => Some(InputEvent::TouchCancel),
        _ => None,
    }
}

/// Register mouse and touch listeners on the canvas for the page lifetime.
pub fn attach(
    canvas: &HtmlCanvasElement,
    dispatch: impl Fn(InputEvent) + Clone + 'static,
) -> Result<(), JsValue> {
    for kind in MOUSE_EVENTS {
        let dispatch = dispatch.clone();
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(input) = from_mouse(kind, &event) {
                dispatch(input);
            }
        });
        canvas.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        callback.forget();
    }

    // Non-passive so drawing does not scroll the page.
    let options = AddEventListenerOptions::new();
    options.set_passive(false);

    for kind in TOUCH_EVENTS {
        let dispatch = dispatch.clone();
        let target: Element = canvas.clone().into();
        let callback = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(input) = from_touch(kind, &event, &target) {
                dispatch(input);
            }
        });
        canvas.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        callback.forget();
    }

    Ok(())
}
