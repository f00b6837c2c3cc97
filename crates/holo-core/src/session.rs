//! Staged editing of the scene configuration.
//!
//! The panel is either closed or open with a draft copied from the live
//! configuration. Every edit touches only the draft; [`ConfigSession::commit`]
//! hands the whole draft back to the caller for a single-assignment swap.

use crate::config::{clamp_scale, SceneConfig};
use crate::constants::{DEFAULT_OBJECT_SCALE, SCALE_MIN};
use crate::geometry::{GeometryArgs, GeometryKind};
use crate::shader::ScanMode;
use crate::texture_set::{find_texture_set, TextureSelection, TextureSet};
use crate::theme::find_theme;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("control panel is closed")]
    Closed,
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("unknown texture set `{0}`")]
    UnknownTextureSet(String),
    #[error("unknown geometry kind `{0}`")]
    UnknownGeometry(String),
    #[error("scan mode {0} is out of range")]
    InvalidScanMode(u32),
    #[error("scale axis {0} is out of range")]
    ScaleAxis(usize),
    #[error("{kind} has no argument slot {index}")]
    GeometryArgIndex { kind: GeometryKind, index: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PanelState {
    #[default]
    Closed,
    Open {
        draft: SceneConfig,
    },
}

/// Remembered inputs of the custom texture form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomTextureForm {
    pub visible: bool,
    pub color: String,
    pub depth: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomTextureOutcome {
    /// Draft now carries a custom override; the form was closed.
    Applied,
    /// A locator was empty; nothing changed and the form stays open.
    Incomplete,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigSession {
    state: PanelState,
    form: CustomTextureForm,
}

/// Longest leading decimal number in `text` ("3px" reads as 3, ".5e2x" as 50).
/// Leading whitespace is skipped; no number at all gives `None`.
pub fn leading_number(text: &str) -> Option<f32> {
    let s = text.trim_start().as_bytes();
    let digits = |from: usize| s[from..].iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = usize::from(matches!(s.first(), Some(b'+' | b'-')));
    let int = digits(end);
    end += int;
    let mut frac = 0;
    if s.get(end) == Some(&b'.') {
        frac = digits(end + 1);
        if int > 0 || frac > 0 {
            end += 1 + frac;
        }
    }
    if int == 0 && frac == 0 {
        return None;
    }
    if matches!(s.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(s.get(end + 1), Some(b'+' | b'-')));
        let exp = digits(end + 1 + sign);
        if exp > 0 {
            end += 1 + sign + exp;
        }
    }
    std::str::from_utf8(&s[..end]).ok()?.parse::<f32>().ok()
}

/// Scale slider text; unparsable input lands on the minimum.
pub fn parse_scale(text: &str) -> f32 {
    leading_number(text).map(clamp_scale).unwrap_or(SCALE_MIN)
}

/// Geometry field text; unparsable or non-finite input becomes 0.
pub fn parse_geometry_arg(text: &str) -> f32 {
    leading_number(text)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl ConfigSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open { .. })
    }

    pub fn draft(&self) -> Option<&SceneConfig> {
        match &self.state {
            PanelState::Open { draft } => Some(draft),
            PanelState::Closed => None,
        }
    }

    #[inline]
    pub fn form(&self) -> &CustomTextureForm {
        &self.form
    }

    fn draft_mut(&mut self) -> Result<&mut SceneConfig, SessionError> {
        match &mut self.state {
            PanelState::Open { draft } => Ok(draft),
            PanelState::Closed => Err(SessionError::Closed),
        }
    }

    /// Open (or re-open) with a fresh copy of `live`.
    pub fn open(&mut self, live: &SceneConfig) {
        self.state = PanelState::Open {
            draft: live.clone(),
        };
        self.form.visible = false;
        log::debug!("[session] panel opened");
    }

    /// Drop the draft and close. Live is untouched.
    pub fn close(&mut self) {
        if self.is_open() {
            log::debug!("[session] panel closed without applying");
        }
        self.state = PanelState::Closed;
        self.form.visible = false;
    }

    /// Throw away edits but keep the panel open on a fresh copy of `live`.
    pub fn revert(&mut self, live: &SceneConfig) -> Result<(), SessionError> {
        *self.draft_mut()? = live.clone();
        log::debug!("[session] draft reverted");
        Ok(())
    }

    /// Close and hand back the draft for the caller to make live.
    pub fn commit(&mut self) -> Result<SceneConfig, SessionError> {
        match std::mem::take(&mut self.state) {
            PanelState::Open { draft } => {
                self.form.visible = false;
                Ok(draft)
            }
            PanelState::Closed => Err(SessionError::Closed),
        }
    }

    pub fn select_theme(&mut self, id: &str) -> Result<(), SessionError> {
        let theme = find_theme(id).ok_or_else(|| SessionError::UnknownTheme(id.to_string()))?;
        self.draft_mut()?.theme = theme.id.to_string();
        Ok(())
    }

    /// Select a registered pair; this replaces any custom override.
    pub fn select_texture_set(&mut self, id: &str) -> Result<(), SessionError> {
        if find_texture_set(id).is_none() {
            return Err(SessionError::UnknownTextureSet(id.to_string()));
        }
        self.draft_mut()?.texture = TextureSelection::Registered(id.to_string());
        Ok(())
    }

    pub fn set_scan_mode(&mut self, index: u32) -> Result<(), SessionError> {
        let mode = ScanMode::from_index(index).ok_or(SessionError::InvalidScanMode(index))?;
        self.draft_mut()?.scan_mode = mode;
        Ok(())
    }

    pub fn set_scale(&mut self, axis: usize, value: f32) -> Result<(), SessionError> {
        let draft = self.draft_mut()?;
        let slot = draft
            .object
            .scale
            .get_mut(axis)
            .ok_or(SessionError::ScaleAxis(axis))?;
        *slot = clamp_scale(value);
        Ok(())
    }

    pub fn set_scale_text(&mut self, axis: usize, text: &str) -> Result<(), SessionError> {
        self.set_scale(axis, parse_scale(text))
    }

    /// Switch kind; the edited arguments are cleared so the new kind's
    /// defaults apply.
    pub fn set_geometry_kind(&mut self, kind: GeometryKind) -> Result<(), SessionError> {
        let object = &mut self.draft_mut()?.object;
        object.geometry = kind;
        object.geometry_args.clear();
        Ok(())
    }

    pub fn set_geometry_kind_id(&mut self, id: &str) -> Result<(), SessionError> {
        let kind =
            GeometryKind::from_id(id).ok_or_else(|| SessionError::UnknownGeometry(id.to_string()))?;
        self.set_geometry_kind(kind)
    }

    /// Set one argument slot. An empty vector is first filled with the kind's
    /// defaults so the other slots keep what the panel was showing.
    pub fn set_geometry_arg(&mut self, index: usize, value: f32) -> Result<(), SessionError> {
        let object = &mut self.draft_mut()?.object;
        let kind = object.geometry;
        if index >= kind.arg_count() {
            return Err(SessionError::GeometryArgIndex { kind, index });
        }
        if object.geometry_args.len() < kind.arg_count() {
            let defaults = kind.default_args();
            let have = object.geometry_args.len();
            object.geometry_args.extend_from_slice(&defaults[have..]);
        }
        object.geometry_args[index] = if value.is_finite() { value } else { 0.0 };
        Ok(())
    }

    pub fn set_geometry_arg_text(&mut self, index: usize, text: &str) -> Result<(), SessionError> {
        self.set_geometry_arg(index, parse_geometry_arg(text))
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.draft_mut()?.auto_rotate = enabled;
        Ok(())
    }

    pub fn set_custom_title(&mut self, title: &str) -> Result<(), SessionError> {
        self.draft_mut()?.custom_title = title.to_string();
        Ok(())
    }

    pub fn set_custom_subtitle(&mut self, subtitle: &str) -> Result<(), SessionError> {
        self.draft_mut()?.custom_subtitle = subtitle.to_string();
        Ok(())
    }

    pub fn toggle_custom_form(&mut self) -> Result<bool, SessionError> {
        self.draft_mut()?;
        self.form.visible = !self.form.visible;
        Ok(self.form.visible)
    }

    /// Replace the draft's texture selection with a custom pair that inherits
    /// the draft's current scale and geometry kind.
    pub fn submit_custom_texture(
        &mut self,
        color: &str,
        depth: &str,
    ) -> Result<CustomTextureOutcome, SessionError> {
        let draft = self.draft_mut()?;
        let (color, depth) = (color.trim(), depth.trim());
        if color.is_empty() || depth.is_empty() {
            self.form.color = color.to_string();
            self.form.depth = depth.to_string();
            self.form.visible = true;
            log::debug!("[session] custom texture needs both locators");
            return Ok(CustomTextureOutcome::Incomplete);
        }
        draft.texture = TextureSelection::Custom(TextureSet::custom(
            color,
            depth,
            draft.object.scale,
            draft.object.geometry,
        ));
        self.form = CustomTextureForm {
            visible: false,
            color: color.to_string(),
            depth: depth.to_string(),
        };
        Ok(CustomTextureOutcome::Applied)
    }

    /// Baseline object, no custom text, auto-rotate on. Theme, texture and
    /// scan mode are kept.
    pub fn reset_defaults(&mut self) -> Result<(), SessionError> {
        let draft = self.draft_mut()?;
        draft.object.scale = DEFAULT_OBJECT_SCALE;
        draft.object.geometry = GeometryKind::Plane;
        draft.object.geometry_args = GeometryArgs::new();
        draft.custom_title.clear();
        draft.custom_subtitle.clear();
        draft.auto_rotate = true;
        Ok(())
    }
}
