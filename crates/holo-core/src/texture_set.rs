use crate::constants::{CUSTOM_TEXTURE_SET_NAME, DEFAULT_TEXTURE_SET_ID};
use crate::geometry::GeometryKind;
use crate::registry::{Keyed, Registry};
use std::borrow::Cow;

/// Color + depth texture pair with the object defaults that suit it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureSet {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    /// Locator of the displayed color image (URL or path).
    pub color: Cow<'static, str>,
    /// Locator of the depth image; red/green drive parallax, red gates the scan band.
    pub depth: Cow<'static, str>,
    pub scale: [f32; 3],
    pub geometry: GeometryKind,
}

impl Keyed for TextureSet {
    fn key(&self) -> &str {
        &self.id
    }
}

impl TextureSet {
    /// Runtime override built from two user-supplied locators.
    pub fn custom(
        color: impl Into<String>,
        depth: impl Into<String>,
        scale: [f32; 3],
        geometry: GeometryKind,
    ) -> Self {
        Self {
            id: Cow::Borrowed("custom"),
            name: Cow::Borrowed(CUSTOM_TEXTURE_SET_NAME),
            color: Cow::Owned(color.into()),
            depth: Cow::Owned(depth.into()),
            scale,
            geometry,
        }
    }

    #[inline]
    pub fn locators(&self) -> TextureLocators {
        TextureLocators {
            color: self.color.to_string(),
            depth: self.depth.to_string(),
        }
    }
}

const TEXTURE_SET_TABLE: &[TextureSet] = &[
    TextureSet {
        id: Cow::Borrowed("face"),
        name: Cow::Borrowed("Face Scan"),
        color: Cow::Borrowed("https://i.postimg.cc/XYwvXN8D/img-4.png"),
        depth: Cow::Borrowed("https://i.postimg.cc/2SHKQh2q/raw-4.webp"),
        scale: [3.0, 3.0, 1.0],
        geometry: GeometryKind::Plane,
    },
    TextureSet {
        id: Cow::Borrowed("custom1"),
        name: Cow::Borrowed("Custom Object"),
        color: Cow::Borrowed("/sample_imgs/image1.png"),
        depth: Cow::Borrowed("/sample_imgs/image1.png"),
        scale: [2.5, 2.5, 1.0],
        geometry: GeometryKind::Plane,
    },
    TextureSet {
        id: Cow::Borrowed("sphere"),
        name: Cow::Borrowed("Sphere Scan"),
        color: Cow::Borrowed("/sample_imgs/image.png"),
        depth: Cow::Borrowed("/sample_imgs/image.png"),
        scale: [1.0, 1.0, 1.0],
        geometry: GeometryKind::Sphere,
    },
];

pub static TEXTURE_SETS: Registry<TextureSet> = Registry::new(TEXTURE_SET_TABLE);

#[inline]
pub fn find_texture_set(id: &str) -> Option<&'static TextureSet> {
    TEXTURE_SETS.get(id)
}

/// Which texture pair drives the material: a registry entry or a custom override.
#[derive(Clone, Debug, PartialEq)]
pub enum TextureSelection {
    Registered(String),
    Custom(TextureSet),
}

impl Default for TextureSelection {
    fn default() -> Self {
        TextureSelection::Registered(DEFAULT_TEXTURE_SET_ID.to_string())
    }
}

impl TextureSelection {
    /// The set the renderer should load. Unknown registered ids fall back to
    /// the default set so a frame can always be produced.
    pub fn resolve(&self) -> &TextureSet {
        match self {
            TextureSelection::Custom(set) => set,
            TextureSelection::Registered(id) => find_texture_set(id)
                .or_else(|| find_texture_set(DEFAULT_TEXTURE_SET_ID))
                .unwrap_or(&TEXTURE_SET_TABLE[0]),
        }
    }

    pub fn registered_id(&self) -> Option<&str> {
        match self {
            TextureSelection::Registered(id) => Some(id),
            TextureSelection::Custom(_) => None,
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, TextureSelection::Custom(_))
    }

    pub fn display_name(&self) -> String {
        self.resolve().name.to_string()
    }
}

/// The pair of locators the renderer actually requests from a loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureLocators {
    pub color: String,
    pub depth: String,
}
