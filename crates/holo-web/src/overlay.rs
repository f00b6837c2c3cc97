//! Title and subtitle overlay elements driven by the reveal sequencer.

use holo_core::{RevealSequencer, Theme};
use web_sys as web;

pub const TITLE_ID: &str = "scan-title";
pub const SUBTITLE_ID: &str = "scan-subtitle";
pub const ROOT_ID: &str = "scan-root";

/// Remembers what was last written so the DOM is only touched on change.
/// The first update always writes, replacing whatever the page shipped with.
#[derive(Default)]
pub struct TitleOverlay {
    title: String,
    subtitle: Option<String>,
    theme: &'static str,
    primed: bool,
}

impl TitleOverlay {
    pub fn update(&mut self, document: &web::Document, reveal: &RevealSequencer, theme: &'static Theme) {
        if self.theme != theme.id {
            self.apply_theme(document, theme);
            self.theme = theme.id;
        }

        let title = reveal.visible_title();
        if !self.primed || title != self.title {
            if let Some(el) = document.get_element_by_id(TITLE_ID) {
                el.set_text_content(Some(&title));
            }
            self.title = title;
        }

        let subtitle = reveal
            .state()
            .subtitle_visible
            .then(|| reveal.subtitle().to_string());
        if !self.primed || subtitle != self.subtitle {
            if let Some(el) = document.get_element_by_id(SUBTITLE_ID) {
                match &subtitle {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("style", "");
                    }
                    None => {
                        let _ = el.set_attribute("style", "display:none");
                    }
                }
            }
            self.subtitle = subtitle;
        }
        self.primed = true;
    }

    fn apply_theme(&self, document: &web::Document, theme: &'static Theme) {
        for id in [TITLE_ID, SUBTITLE_ID] {
            if let Some(el) = document.get_element_by_id(id) {
                let classes = el.class_list();
                if let Some(previous) = holo_core::theme::find_theme(self.theme) {
                    let _ = classes.remove_1(previous.text_color);
                }
                let _ = classes.add_1(theme.text_color);
            }
        }
        if let Some(root) = document.get_element_by_id(ROOT_ID) {
            let _ = root.set_attribute("data-gradient", theme.bg_gradient);
            let _ = root.set_attribute("data-theme", theme.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holo_core::SceneConfig;
    use std::time::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(document: &web::Document, id: &str, text: &str) -> web::Element {
        let el = document.create_element("div").unwrap();
        el.set_id(id);
        el.set_text_content(Some(text));
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn first_update_hides_the_page_subtitle_and_clears_the_title() {
        let document = crate::dom::window_document().unwrap();
        let title = element(&document, TITLE_ID, "Loading title");
        let subtitle = element(&document, SUBTITLE_ID, "Loading subtitle");

        let config = SceneConfig::default();
        let mut reveal = RevealSequencer::new(&config);
        let mut overlay = TitleOverlay::default();
        overlay.update(&document, &reveal, config.theme());

        assert_eq!(title.text_content().as_deref(), Some(""));
        assert_eq!(subtitle.get_attribute("style").as_deref(), Some("display:none"));
        assert!(subtitle.class_list().contains(config.theme().text_color));

        reveal.advance(Duration::from_secs(10));
        overlay.update(&document, &reveal, config.theme());
        assert_eq!(title.text_content().as_deref(), Some(reveal.title()));
        assert_eq!(subtitle.text_content().as_deref(), Some(reveal.subtitle()));
        assert_eq!(subtitle.get_attribute("style").as_deref(), Some(""));

        title.remove();
        subtitle.remove();
    }
}
