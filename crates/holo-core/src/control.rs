//! The control surface hosts talk to.
//!
//! [`Scanner`] ties the live renderer, the panel session and the title
//! sequencer together. Commits go through [`Scanner::apply_changes`], which
//! swaps the live configuration in one step and notifies the listeners.

use crate::config::{ConfigChanges, ConfigListener, SceneConfig};
use crate::geometry::GeometryKind;
use crate::keymap::PanelCommand;
use crate::renderer::{Frame, SceneRenderer};
use crate::reveal::{RevealSequencer, RevealState};
use crate::session::{ConfigSession, CustomTextureOutcome, SessionError};
use crate::shader::ScanMode;
use crate::texture::TextureLoader;
use crate::texture_set::{TextureSelection, TEXTURE_SETS};
use crate::theme::{PanelPalette, Theme, THEMES};
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeOption {
    pub id: &'static str,
    pub name: &'static str,
    pub scan_color: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// One editable geometry field as a panel shows it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryParamRow {
    pub index: usize,
    pub label: &'static str,
    pub value: f32,
}

pub fn theme_options() -> Vec<ThemeOption> {
    THEMES
        .iter()
        .map(|t| ThemeOption {
            id: t.id,
            name: t.name,
            scan_color: t.scan_color,
        })
        .collect()
}

pub fn texture_set_options() -> Vec<NamedOption> {
    TEXTURE_SETS
        .iter()
        .map(|set| NamedOption {
            id: &set.id,
            name: &set.name,
        })
        .collect()
}

pub fn geometry_options() -> Vec<NamedOption> {
    GeometryKind::ALL
        .iter()
        .map(|k| NamedOption {
            id: k.id(),
            name: k.name(),
        })
        .collect()
}

pub fn scan_mode_options() -> Vec<&'static str> {
    ScanMode::ALL.iter().map(|m| m.name()).collect()
}

pub fn geometry_param_rows(config: &SceneConfig) -> Vec<GeometryParamRow> {
    config
        .object
        .geometry
        .arg_specs()
        .iter()
        .enumerate()
        .map(|(index, spec)| GeometryParamRow {
            index,
            label: spec.label,
            value: config.object.display_arg(index).unwrap_or(spec.default),
        })
        .collect()
}

pub struct Scanner<L: TextureLoader> {
    renderer: SceneRenderer<L>,
    session: ConfigSession,
    reveal: RevealSequencer,
}

impl<L: TextureLoader> Scanner<L> {
    pub fn new(config: SceneConfig, loader: L) -> Self {
        let reveal = RevealSequencer::new(&config);
        Self {
            renderer: SceneRenderer::new(config, loader),
            session: ConfigSession::new(),
            reveal,
        }
    }

    #[inline]
    pub fn live(&self) -> &SceneConfig {
        self.renderer.config()
    }

    #[inline]
    pub fn renderer(&self) -> &SceneRenderer<L> {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut SceneRenderer<L> {
        &mut self.renderer
    }

    #[inline]
    pub fn session(&self) -> &ConfigSession {
        &self.session
    }

    #[inline]
    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    #[inline]
    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    #[inline]
    pub fn theme(&self) -> &'static Theme {
        self.live().theme()
    }

    pub fn palette(&self) -> PanelPalette {
        self.theme().palette()
    }

    /// Draft while the panel is open, live otherwise.
    pub fn shown_config(&self) -> &SceneConfig {
        self.session.draft().unwrap_or_else(|| self.renderer.config())
    }

    pub fn geometry_param_rows(&self) -> Vec<GeometryParamRow> {
        geometry_param_rows(self.shown_config())
    }

    /// One host frame: advance the title reveal and produce what to draw.
    pub fn tick(&mut self, dt: Duration, pointer: Vec2) -> Frame<'_> {
        self.reveal.advance(dt);
        self.renderer.tick(dt.as_secs_f32(), pointer)
    }

    // Panel lifecycle -------------------------------------------------------

    pub fn open_panel(&mut self) {
        self.session.open(self.renderer.config());
    }

    pub fn close_panel(&mut self) {
        self.session.close();
    }

    pub fn discard_changes(&mut self) {
        self.session.close();
    }

    pub fn revert_draft(&mut self) -> Result<(), SessionError> {
        self.session.revert(self.renderer.config())
    }

    /// Make the draft live and close the panel. Returns the fields that
    /// changed, in the order they were applied.
    pub fn apply_changes(&mut self) -> Result<ConfigChanges, SessionError> {
        let draft = self.session.commit()?;
        let changes = draft.changes_since(self.renderer.config());
        if changes.is_empty() {
            log::info!("[session] applied with no changes");
        } else {
            let names: Vec<&str> = changes.iter().map(|f| f.name()).collect();
            log::info!("[session] applied: {}", names.join(", "));
        }
        self.renderer.config_committed(&draft, &changes);
        self.reveal.config_committed(&draft, &changes);
        Ok(changes)
    }

    // Draft edits -----------------------------------------------------------

    pub fn select_theme(&mut self, id: &str) -> Result<(), SessionError> {
        self.session.select_theme(id)
    }

    pub fn select_texture_set(&mut self, id: &str) -> Result<(), SessionError> {
        self.session.select_texture_set(id)
    }

    pub fn set_scan_mode(&mut self, index: u32) -> Result<(), SessionError> {
        self.session.set_scan_mode(index)
    }

    pub fn set_scale(&mut self, axis: usize, value: f32) -> Result<(), SessionError> {
        self.session.set_scale(axis, value)
    }

    pub fn set_scale_text(&mut self, axis: usize, text: &str) -> Result<(), SessionError> {
        self.session.set_scale_text(axis, text)
    }

    pub fn set_geometry_kind(&mut self, kind: GeometryKind) -> Result<(), SessionError> {
        self.session.set_geometry_kind(kind)
    }

    pub fn set_geometry_kind_id(&mut self, id: &str) -> Result<(), SessionError> {
        self.session.set_geometry_kind_id(id)
    }

    pub fn set_geometry_arg(&mut self, index: usize, value: f32) -> Result<(), SessionError> {
        self.session.set_geometry_arg(index, value)
    }

    pub fn set_geometry_arg_text(&mut self, index: usize, text: &str) -> Result<(), SessionError> {
        self.session.set_geometry_arg_text(index, text)
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.session.set_auto_rotate(enabled)
    }

    pub fn set_custom_title(&mut self, title: &str) -> Result<(), SessionError> {
        self.session.set_custom_title(title)
    }

    pub fn set_custom_subtitle(&mut self, subtitle: &str) -> Result<(), SessionError> {
        self.session.set_custom_subtitle(subtitle)
    }

    pub fn toggle_custom_form(&mut self) -> Result<bool, SessionError> {
        self.session.toggle_custom_form()
    }

    pub fn submit_custom_texture(
        &mut self,
        color: &str,
        depth: &str,
    ) -> Result<CustomTextureOutcome, SessionError> {
        self.session.submit_custom_texture(color, depth)
    }

    pub fn reset_defaults(&mut self) -> Result<(), SessionError> {
        self.session.reset_defaults()
    }

    // Keyboard --------------------------------------------------------------

    /// Run a shortcut. Editing shortcuts open the panel first when it is closed.
    pub fn run_command(&mut self, cmd: PanelCommand) -> Result<(), SessionError> {
        if cmd.edits_draft() && !self.session.is_open() {
            self.open_panel();
        }
        match cmd {
            PanelCommand::TogglePanel => {
                if self.session.is_open() {
                    self.close_panel();
                } else {
                    self.open_panel();
                }
                Ok(())
            }
            PanelCommand::SelectTheme(index) => match THEMES.at(index) {
                Some(theme) => self.select_theme(theme.id),
                None => Ok(()),
            },
            PanelCommand::CycleTextureSet => {
                let next = {
                    let draft = self.shown_config();
                    let position = match &draft.texture {
                        TextureSelection::Registered(id) => TEXTURE_SETS.position(id),
                        TextureSelection::Custom(_) => None,
                    };
                    let next = position.map_or(0, |p| (p + 1) % TEXTURE_SETS.len());
                    TEXTURE_SETS.at(next).map(|set| set.id.to_string())
                };
                match next {
                    Some(id) => self.select_texture_set(&id),
                    None => Ok(()),
                }
            }
            PanelCommand::CycleScanMode => {
                let mode = self.shown_config().scan_mode.next();
                self.set_scan_mode(mode.index())
            }
            PanelCommand::CycleGeometry => {
                let kind = self.shown_config().object.geometry.next();
                self.set_geometry_kind(kind)
            }
            PanelCommand::ToggleAutoRotate => {
                let enabled = !self.shown_config().auto_rotate;
                self.set_auto_rotate(enabled)
            }
            PanelCommand::NudgeScale(delta) => {
                let scale = self.shown_config().object.scale;
                for (axis, value) in scale.iter().enumerate() {
                    self.set_scale(axis, value + delta)?;
                }
                Ok(())
            }
            PanelCommand::ResetDefaults => self.reset_defaults(),
            PanelCommand::Apply => self.apply_changes().map(|_| ()),
            PanelCommand::Discard => {
                self.discard_changes();
                Ok(())
            }
        }
    }
}
