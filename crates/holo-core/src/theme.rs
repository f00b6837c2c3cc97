use crate::constants::DEFAULT_THEME_ID;
use crate::registry::{Keyed, Registry};
use glam::Vec3;

/// Named visual theme: scan tint, motion parameters and title copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub scan_color: [f32; 3],
    pub text_color: &'static str,
    pub bg_gradient: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub bloom_strength: f32,
    /// Angular rate fed to `sin(t * scan_speed)` when computing scan progress.
    pub scan_speed: f32,
    /// Carried into the uniform block but not read by the fragment stage.
    pub glitch_intensity: f32,
}

impl Keyed for Theme {
    fn key(&self) -> &str {
        self.id
    }
}

impl Theme {
    #[inline]
    pub fn scan_color_vec3(&self) -> Vec3 {
        Vec3::from(self.scan_color)
    }

    /// Accent colors a control panel derives from the scan tint.
    pub fn palette(&self) -> PanelPalette {
        PanelPalette::from_scan_color(self.scan_color)
    }
}

const THEME_TABLE: &[Theme] = &[
    Theme {
        id: "cyberpunk",
        name: "Cyberpunk",
        scan_color: [1.0, 0.0, 0.0],
        text_color: "text-red-400",
        bg_gradient: "from-black via-gray-900 to-red-900",
        title: "NEURAL LINK",
        subtitle: "Connection established. Accessing mainframe...",
        bloom_strength: 1.2,
        scan_speed: 0.5,
        glitch_intensity: 0.07,
    },
    Theme {
        id: "matrix",
        name: "Matrix",
        scan_color: [0.0, 1.0, 0.0],
        text_color: "text-green-400",
        bg_gradient: "from-black via-gray-900 to-green-900",
        title: "THE MATRIX",
        subtitle: "Wake up, Neo. Follow the white rabbit.",
        bloom_strength: 1.5,
        scan_speed: 0.3,
        glitch_intensity: 0.1,
    },
    Theme {
        id: "neon",
        name: "Neon",
        scan_color: [0.0, 1.0, 1.0],
        text_color: "text-cyan-400",
        bg_gradient: "from-black via-purple-900 to-cyan-900",
        title: "NEON DREAMS",
        subtitle: "Synthwave aesthetic. Retro-futuristic vibes.",
        bloom_strength: 2.0,
        scan_speed: 0.4,
        glitch_intensity: 0.05,
    },
    Theme {
        id: "plasma",
        name: "Plasma",
        scan_color: [1.0, 0.0, 1.0],
        text_color: "text-fuchsia-400",
        bg_gradient: "from-black via-purple-900 to-fuchsia-900",
        title: "PLASMA CORE",
        subtitle: "High-energy particle acceleration in progress.",
        bloom_strength: 1.8,
        scan_speed: 0.6,
        glitch_intensity: 0.08,
    },
    Theme {
        id: "arctic",
        name: "Arctic",
        scan_color: [0.3, 0.7, 1.0],
        text_color: "text-blue-300",
        bg_gradient: "from-gray-900 via-blue-900 to-cyan-900",
        title: "ARCTIC SCAN",
        subtitle: "Cryogenic systems online. Temperature stable.",
        bloom_strength: 1.0,
        scan_speed: 0.25,
        glitch_intensity: 0.03,
    },
    Theme {
        id: "fire",
        name: "Fire",
        scan_color: [1.0, 0.3, 0.0],
        text_color: "text-orange-400",
        bg_gradient: "from-black via-red-900 to-orange-900",
        title: "INFERNO MODE",
        subtitle: "Thermal overload detected. System critical.",
        bloom_strength: 2.2,
        scan_speed: 0.8,
        glitch_intensity: 0.12,
    },
];

pub static THEMES: Registry<Theme> = Registry::new(THEME_TABLE);

#[inline]
pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.get(id)
}

/// Lookup that never fails: unknown ids render with the default theme.
pub fn theme_or_default(id: &str) -> &'static Theme {
    THEMES
        .get(id)
        .or_else(|| THEMES.get(DEFAULT_THEME_ID))
        .unwrap_or(&THEME_TABLE[0])
}

/// CSS color strings for panel chrome, derived from a theme's scan color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelPalette {
    pub border: String,
    pub text: String,
    pub highlight: String,
    pub button_hover: String,
    pub swatch_background: String,
}

impl PanelPalette {
    pub fn from_scan_color(c: [f32; 3]) -> Self {
        let channel = |scale: f32, bias: f32| -> [u32; 3] {
            [
                (c[0] * scale + bias).round() as u32,
                (c[1] * scale + bias).round() as u32,
                (c[2] * scale + bias).round() as u32,
            ]
        };
        let full = channel(255.0, 0.0);
        let text = channel(200.0, 55.0);
        let dim = channel(50.0, 0.0);
        Self {
            border: format!("rgb({},{},{})", full[0], full[1], full[2]),
            text: format!("rgb({},{},{})", text[0], text[1], text[2]),
            highlight: format!("rgb({},{},{})", full[0], full[1], full[2]),
            button_hover: format!("rgba({},{},{}, 0.2)", full[0], full[1], full[2]),
            swatch_background: format!("rgba({},{},{}, 0.2)", dim[0], dim[1], dim[2]),
        }
    }
}
