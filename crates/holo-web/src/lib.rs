#![cfg(target_arch = "wasm32")]
//! Browser host: WebGPU canvas, pointer and keyboard input, the title
//! overlay and a JS-callable control surface.

mod controls;
mod dom;
mod events;
mod loader;
mod overlay;
mod render;

use glam::Vec2;
use holo_core::constants::{DEFAULT_TEXTURE_SET_ID, DEFAULT_THEME_ID};
use holo_core::texture_set::find_texture_set;
use holo_core::theme::find_theme;
use holo_core::{Scanner, SceneConfig, TextureSelection};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub use controls::WebControls;
use loader::ImageTextureLoader;
use overlay::TitleOverlay;
use render::WebGpu;

pub(crate) type WebScanner = Scanner<ImageTextureLoader>;

const CANVAS_ID: &str = "app-canvas";

#[wasm_bindgen]
pub fn start() -> Result<WebControls, JsValue> {
    start_with(DEFAULT_THEME_ID, DEFAULT_TEXTURE_SET_ID)
}

/// Start with a chosen theme and texture set. Unknown ids fall back to the defaults.
#[wasm_bindgen]
pub fn start_with(theme: &str, texture_set: &str) -> Result<WebControls, JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("holo-web starting");

    let scanner = Rc::new(RefCell::new(Scanner::new(
        initial_config(theme, texture_set),
        ImageTextureLoader,
    )));

    let scanner_init = scanner.clone();
    spawn_local(async move {
        if let Err(e) = init(scanner_init).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(WebControls::new(scanner))
}

fn initial_config(theme: &str, texture_set: &str) -> SceneConfig {
    let mut config = SceneConfig::default();
    match find_theme(theme) {
        Some(t) => config.theme = t.id.to_string(),
        None => log::warn!("[host] unknown theme '{theme}', using {DEFAULT_THEME_ID}"),
    }
    match find_texture_set(texture_set) {
        Some(set) => config.texture = TextureSelection::Registered(set.id.to_string()),
        None => log::warn!("[host] unknown texture set '{texture_set}', using {DEFAULT_TEXTURE_SET_ID}"),
    }
    config
}

async fn init(scanner: Rc<RefCell<WebScanner>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    dom::sync_canvas_backing_size(&canvas);

    let pointer = Rc::new(Cell::new(Vec2::ZERO));
    events::wire_resize(&window, canvas.clone());
    events::wire_pointer(&window, canvas.clone(), pointer.clone());
    events::wire_keydown(&window, scanner.clone());

    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas));
    let gpu = WebGpu::new(leaked_canvas).await?;

    start_loop(FrameContext {
        document,
        scanner,
        pointer,
        gpu,
        overlay: TitleOverlay::default(),
        last_frame: Instant::now(),
    });
    Ok(())
}

struct FrameContext {
    document: web::Document,
    scanner: Rc<RefCell<WebScanner>>,
    pointer: Rc<Cell<Vec2>>,
    gpu: WebGpu<'static>,
    overlay: TitleOverlay,
    last_frame: Instant,
}

impl FrameContext {
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        let mut scanner = self.scanner.borrow_mut();
        let frame = scanner.tick(dt, self.pointer.get());
        self.gpu.render(&frame);
        self.overlay
            .update(&self.document, scanner.reveal(), scanner.theme());
    }
}

fn start_loop(mut ctx: FrameContext) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
