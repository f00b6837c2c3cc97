//! Texture loading through `<img>` elements.
//!
//! The browser fetches and decodes; once the image loads it is drawn into a
//! scratch 2d canvas and read back as RGBA bytes for the ticket.

use holo_core::{
    texture_request, TextureCompleter, TextureError, TextureLoader, TexturePixels, TextureTicket,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static IN_FLIGHT: Cell<usize> = const { Cell::new(0) };
}

/// Image elements whose callbacks are still registered.
fn in_flight() -> usize {
    IN_FLIGHT.with(Cell::get)
}

/// Everything one `<img>` request keeps alive until its first callback fires.
struct PendingImage {
    image: web::HtmlImageElement,
    completer: TextureCompleter,
    on_load: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut()>,
}

type SharedPending = Rc<RefCell<Option<PendingImage>>>;

/// Resolve the request and release the element and both callbacks.
fn settle(shared: &SharedPending, loaded: bool) {
    let Some(pending) = shared.borrow_mut().take() else {
        return;
    };
    let PendingImage {
        image,
        completer,
        on_load,
        on_error,
    } = pending;
    image.set_onload(None);
    image.set_onerror(None);

    let result = if loaded {
        read_pixels(&image, completer.locator())
    } else {
        Err(TextureError::Fetch {
            locator: completer.locator().to_string(),
            reason: "image failed to load".into(),
        })
    };
    if let Err(err) = &result {
        log::warn!("[loader] {err}");
    }
    completer.complete(result);

    // One of these closures is running right now; drop them after it returns.
    spawn_local(async move {
        drop((on_load, on_error));
        IN_FLIGHT.with(|n| n.set(n.get().saturating_sub(1)));
    });
}

#[derive(Default)]
pub struct ImageTextureLoader;

impl TextureLoader for ImageTextureLoader {
    fn load(&mut self, locator: &str) -> TextureTicket {
        let (completer, ticket) = texture_request(locator);
        let image = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                completer.complete(Err(TextureError::Fetch {
                    locator: locator.to_string(),
                    reason: format!("{:?}", e),
                }));
                return ticket;
            }
        };
        image.set_cross_origin(Some("anonymous"));

        // Only one of onload/onerror fires; whichever does settles the request.
        let shared: SharedPending = Rc::new(RefCell::new(None));
        let on_load = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move || settle(&shared, true)) as Box<dyn FnMut()>)
        };
        let on_error = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move || settle(&shared, false)) as Box<dyn FnMut()>)
        };
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        image.set_src(locator);

        *shared.borrow_mut() = Some(PendingImage {
            image,
            completer,
            on_load,
            on_error,
        });
        IN_FLIGHT.with(|n| n.set(n.get() + 1));
        log::debug!("[loader] requested {locator} ({} in flight)", in_flight());
        ticket
    }
}

fn read_pixels(image: &web::HtmlImageElement, locator: &str) -> Result<TexturePixels, TextureError> {
    let decode_err = |reason: String| TextureError::Decode {
        locator: locator.to_string(),
        reason,
    };
    let (width, height) = (image.natural_width(), image.natural_height());
    if width == 0 || height == 0 {
        return Err(decode_err("image has no pixels".into()));
    }
    let document = crate::dom::window_document().ok_or_else(|| decode_err("no document".into()))?;
    let canvas = document
        .create_element("canvas")
        .map_err(|e| decode_err(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| decode_err(format!("{:?}", e)))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| decode_err(format!("{:?}", e)))?
        .ok_or_else(|| decode_err("2d context unavailable".into()))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| decode_err(format!("{:?}", e)))?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)
        .map_err(|e| decode_err(format!("{:?}", e)))?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| decode_err(format!("{:?}", e)))?;
    TexturePixels::new(width, height, data.data().0)
}
