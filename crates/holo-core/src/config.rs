//! Configuration values shared by the live scene and the panel draft.
//!
//! Both are plain values with structural equality: a draft is a deep copy of
//! the live configuration and a commit replaces the live value wholesale.

use crate::constants::{DEFAULT_OBJECT_SCALE, DEFAULT_THEME_ID, SCALE_MAX, SCALE_MIN};
use crate::geometry::{resolve_args, GeometryArgs, GeometryKind};
use crate::shader::ScanMode;
use crate::texture_set::TextureSelection;
use crate::theme::{theme_or_default, Theme};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectConfig {
    pub scale: [f32; 3],
    pub geometry: GeometryKind,
    /// Empty means "use the kind's defaults".
    pub geometry_args: GeometryArgs,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_OBJECT_SCALE,
            geometry: GeometryKind::Plane,
            geometry_args: GeometryArgs::new(),
        }
    }
}

impl ObjectConfig {
    #[inline]
    pub fn scale_vec3(&self) -> Vec3 {
        Vec3::from(self.scale)
    }

    /// Arguments actually used to build the mesh.
    pub fn resolved_args(&self) -> GeometryArgs {
        resolve_args(self.geometry, &self.geometry_args)
    }

    /// Value shown in a parameter field: the edited value if present, else the default.
    pub fn display_arg(&self, index: usize) -> Option<f32> {
        let specs = self.geometry.arg_specs();
        let spec = specs.get(index)?;
        Some(self.geometry_args.get(index).copied().unwrap_or(spec.default))
    }
}

#[inline]
pub fn clamp_scale(value: f32) -> f32 {
    if value.is_nan() {
        SCALE_MIN
    } else {
        value.clamp(SCALE_MIN, SCALE_MAX)
    }
}

/// Everything the panel can change, as one value.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub theme: String,
    pub texture: TextureSelection,
    pub scan_mode: ScanMode,
    pub custom_title: String,
    pub custom_subtitle: String,
    pub object: ObjectConfig,
    pub auto_rotate: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME_ID.to_string(),
            texture: TextureSelection::default(),
            scan_mode: ScanMode::Horizontal,
            custom_title: String::new(),
            custom_subtitle: String::new(),
            object: ObjectConfig::default(),
            auto_rotate: false,
        }
    }
}

impl SceneConfig {
    #[inline]
    pub fn theme(&self) -> &'static Theme {
        theme_or_default(&self.theme)
    }

    /// Custom title if non-empty, else the theme's.
    pub fn effective_title(&self) -> &str {
        if self.custom_title.is_empty() {
            self.theme().title
        } else {
            &self.custom_title
        }
    }

    pub fn effective_subtitle(&self) -> &str {
        if self.custom_subtitle.is_empty() {
            self.theme().subtitle
        } else {
            &self.custom_subtitle
        }
    }

    /// Fields that differ from `previous`, in commit batch order.
    pub fn changes_since(&self, previous: &SceneConfig) -> ConfigChanges {
        let mut out = ConfigChanges::new();
        if self.theme != previous.theme {
            out.push(ConfigField::Theme);
        }
        if self.texture != previous.texture {
            out.push(ConfigField::TextureSet);
        }
        if self.scan_mode != previous.scan_mode {
            out.push(ConfigField::ScanMode);
        }
        if self.custom_title != previous.custom_title {
            out.push(ConfigField::CustomTitle);
        }
        if self.custom_subtitle != previous.custom_subtitle {
            out.push(ConfigField::CustomSubtitle);
        }
        if self.object != previous.object {
            out.push(ConfigField::ObjectConfig);
        }
        if self.auto_rotate != previous.auto_rotate {
            out.push(ConfigField::AutoRotate);
        }
        out
    }
}

/// Panel fields in the order a commit applies them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Theme,
    TextureSet,
    ScanMode,
    CustomTitle,
    CustomSubtitle,
    ObjectConfig,
    AutoRotate,
}

impl ConfigField {
    pub const BATCH_ORDER: [ConfigField; 7] = [
        ConfigField::Theme,
        ConfigField::TextureSet,
        ConfigField::ScanMode,
        ConfigField::CustomTitle,
        ConfigField::CustomSubtitle,
        ConfigField::ObjectConfig,
        ConfigField::AutoRotate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigField::Theme => "theme",
            ConfigField::TextureSet => "texture_set",
            ConfigField::ScanMode => "scan_mode",
            ConfigField::CustomTitle => "custom_title",
            ConfigField::CustomSubtitle => "custom_subtitle",
            ConfigField::ObjectConfig => "object_config",
            ConfigField::AutoRotate => "auto_rotate",
        }
    }
}

pub type ConfigChanges = SmallVec<[ConfigField; 7]>;

/// Observer notified after a commit replaced the live configuration.
pub trait ConfigListener {
    fn config_committed(&mut self, config: &SceneConfig, changes: &[ConfigField]);
}
