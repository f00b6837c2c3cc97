//! JS-callable control surface for an HTML panel.
//!
//! Every method forwards to the shared [`Scanner`](holo_core::Scanner);
//! session errors surface as rejected calls carrying the error text.

use crate::WebScanner;
use holo_core::control::{self, GeometryParamRow, NamedOption, ThemeOption};
use holo_core::{CustomTextureOutcome, PanelPalette, SessionError};
use js_sys::{Array, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn js_err(err: SessionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn set(obj: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

fn theme_object(opt: &ThemeOption) -> Object {
    let obj = Object::new();
    set(&obj, "id", opt.id);
    set(&obj, "name", opt.name);
    let color: Array = opt.scan_color.iter().map(|c| JsValue::from_f64(*c as f64)).collect();
    set(&obj, "scanColor", color);
    obj
}

fn named_object(opt: &NamedOption) -> Object {
    let obj = Object::new();
    set(&obj, "id", opt.id);
    set(&obj, "name", opt.name);
    obj
}

fn param_object(row: &GeometryParamRow) -> Object {
    let obj = Object::new();
    set(&obj, "index", row.index as u32);
    set(&obj, "label", row.label);
    set(&obj, "value", row.value as f64);
    obj
}

fn palette_object(p: &PanelPalette) -> Object {
    let obj = Object::new();
    set(&obj, "border", p.border.as_str());
    set(&obj, "text", p.text.as_str());
    set(&obj, "highlight", p.highlight.as_str());
    set(&obj, "buttonHover", p.button_hover.as_str());
    set(&obj, "swatchBackground", p.swatch_background.as_str());
    obj
}

#[wasm_bindgen]
pub struct WebControls {
    scanner: Rc<RefCell<WebScanner>>,
}

impl WebControls {
    pub(crate) fn new(scanner: Rc<RefCell<WebScanner>>) -> Self {
        Self { scanner }
    }

    fn edit(&self, f: impl FnOnce(&mut WebScanner) -> Result<(), SessionError>) -> Result<(), JsValue> {
        f(&mut self.scanner.borrow_mut()).map_err(js_err)
    }
}

#[wasm_bindgen]
impl WebControls {
    // Panel lifecycle

    pub fn open_panel(&self) {
        self.scanner.borrow_mut().open_panel();
    }

    pub fn close_panel(&self) {
        self.scanner.borrow_mut().close_panel();
    }

    pub fn is_panel_open(&self) -> bool {
        self.scanner.borrow().session().is_open()
    }

    pub fn discard_changes(&self) {
        self.scanner.borrow_mut().discard_changes();
    }

    pub fn revert_draft(&self) -> Result<(), JsValue> {
        self.edit(|s| s.revert_draft())
    }

    /// Commit the draft; resolves to the names of the fields that changed.
    pub fn apply_changes(&self) -> Result<Array, JsValue> {
        let changes = self.scanner.borrow_mut().apply_changes().map_err(js_err)?;
        Ok(changes.iter().map(|f| JsValue::from_str(f.name())).collect())
    }

    // Draft edits

    pub fn select_theme(&self, id: &str) -> Result<(), JsValue> {
        self.edit(|s| s.select_theme(id))
    }

    pub fn select_texture_set(&self, id: &str) -> Result<(), JsValue> {
        self.edit(|s| s.select_texture_set(id))
    }

    pub fn set_scan_mode(&self, index: u32) -> Result<(), JsValue> {
        self.edit(|s| s.set_scan_mode(index))
    }

    pub fn set_scale(&self, axis: usize, value: f32) -> Result<(), JsValue> {
        self.edit(|s| s.set_scale(axis, value))
    }

    pub fn set_scale_text(&self, axis: usize, text: &str) -> Result<(), JsValue> {
        self.edit(|s| s.set_scale_text(axis, text))
    }

    pub fn set_geometry_kind(&self, id: &str) -> Result<(), JsValue> {
        self.edit(|s| s.set_geometry_kind_id(id))
    }

    pub fn set_geometry_arg(&self, index: usize, value: f32) -> Result<(), JsValue> {
        self.edit(|s| s.set_geometry_arg(index, value))
    }

    pub fn set_geometry_arg_text(&self, index: usize, text: &str) -> Result<(), JsValue> {
        self.edit(|s| s.set_geometry_arg_text(index, text))
    }

    pub fn set_auto_rotate(&self, enabled: bool) -> Result<(), JsValue> {
        self.edit(|s| s.set_auto_rotate(enabled))
    }

    pub fn set_custom_title(&self, title: &str) -> Result<(), JsValue> {
        self.edit(|s| s.set_custom_title(title))
    }

    pub fn set_custom_subtitle(&self, subtitle: &str) -> Result<(), JsValue> {
        self.edit(|s| s.set_custom_subtitle(subtitle))
    }

    pub fn toggle_custom_form(&self) -> Result<bool, JsValue> {
        self.scanner.borrow_mut().toggle_custom_form().map_err(js_err)
    }

    pub fn custom_form_visible(&self) -> bool {
        self.scanner.borrow().session().form().visible
    }

    /// True when the draft now carries the custom pair, false when a locator was empty.
    pub fn submit_custom_texture(&self, color: &str, depth: &str) -> Result<bool, JsValue> {
        let outcome = self
            .scanner
            .borrow_mut()
            .submit_custom_texture(color, depth)
            .map_err(js_err)?;
        Ok(outcome == CustomTextureOutcome::Applied)
    }

    pub fn reset_defaults(&self) -> Result<(), JsValue> {
        self.edit(|s| s.reset_defaults())
    }

    // Listings

    pub fn theme_options(&self) -> Array {
        control::theme_options().iter().map(theme_object).collect()
    }

    pub fn texture_set_options(&self) -> Array {
        control::texture_set_options().iter().map(named_object).collect()
    }

    pub fn geometry_options(&self) -> Array {
        control::geometry_options().iter().map(named_object).collect()
    }

    pub fn scan_mode_options(&self) -> Array {
        control::scan_mode_options()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    pub fn geometry_param_rows(&self) -> Array {
        self.scanner
            .borrow()
            .geometry_param_rows()
            .iter()
            .map(param_object)
            .collect()
    }

    pub fn palette(&self) -> Object {
        palette_object(&self.scanner.borrow().palette())
    }

    // Values shown by the panel: the draft while open, live otherwise

    pub fn shown_theme(&self) -> String {
        self.scanner.borrow().shown_config().theme.clone()
    }

    /// Registered set id, or `undefined` while a custom pair is selected.
    pub fn shown_texture_set(&self) -> Option<String> {
        let scanner = self.scanner.borrow();
        scanner.shown_config().texture.registered_id().map(str::to_string)
    }

    pub fn shown_texture_name(&self) -> String {
        self.scanner.borrow().shown_config().texture.display_name()
    }

    pub fn shown_scan_mode(&self) -> u32 {
        self.scanner.borrow().shown_config().scan_mode.index()
    }

    pub fn shown_scale(&self) -> Vec<f32> {
        self.scanner.borrow().shown_config().object.scale.to_vec()
    }

    pub fn shown_geometry(&self) -> String {
        self.scanner.borrow().shown_config().object.geometry.id().to_string()
    }

    pub fn shown_auto_rotate(&self) -> bool {
        self.scanner.borrow().shown_config().auto_rotate
    }

    pub fn shown_custom_title(&self) -> String {
        self.scanner.borrow().shown_config().custom_title.clone()
    }

    pub fn shown_custom_subtitle(&self) -> String {
        self.scanner.borrow().shown_config().custom_subtitle.clone()
    }
}
