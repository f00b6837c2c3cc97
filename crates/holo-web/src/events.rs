use crate::dom;
use crate::WebScanner;
use glam::Vec2;
use holo_core::{command_for_key, normalize_pointer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys typed into panel inputs belong to the input, not the shortcuts.
fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

pub fn handle_keydown(ev: &web::KeyboardEvent, scanner: &Rc<RefCell<WebScanner>>) {
    if typing_in_field(ev) || ev.ctrl_key() || ev.meta_key() {
        return;
    }
    let key = ev.key();
    let Some(cmd) = command_for_key(&key) else {
        return;
    };
    ev.prevent_default();
    if let Err(err) = scanner.borrow_mut().run_command(cmd) {
        log::warn!("[host] {:?} rejected: {err}", cmd);
    }
}

pub fn wire_keydown(window: &web::Window, scanner: Rc<RefCell<WebScanner>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &scanner);
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Pointer anywhere in the page, measured against the canvas rectangle.
pub fn wire_pointer(window: &web::Window, canvas: web::HtmlCanvasElement, pointer: Rc<Cell<Vec2>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = canvas.get_bounding_client_rect();
        let x = ev.client_x() as f32 - rect.left() as f32;
        let y = ev.client_y() as f32 - rect.top() as f32;
        pointer.set(normalize_pointer(x, y, rect.width() as f32, rect.height() as f32));
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_resize(window: &web::Window, canvas: web::HtmlCanvasElement) {
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
