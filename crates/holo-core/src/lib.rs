pub mod camera;
pub mod config;
pub mod constants;
pub mod control;
pub mod geometry;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod input;
pub mod keymap;
pub mod registry;
pub mod renderer;
pub mod reveal;
pub mod session;
pub mod shader;
pub mod texture;
pub mod texture_set;
pub mod theme;

pub use camera::Camera;
pub use config::{ConfigChanges, ConfigField, ConfigListener, ObjectConfig, SceneConfig};
pub use control::Scanner;
pub use geometry::{GeometryArgs, GeometryKind, Mesh, Vertex};
pub use input::normalize_pointer;
pub use keymap::{command_for_key, PanelCommand};
pub use renderer::{Frame, SceneRenderer};
pub use reveal::{RevealSequencer, RevealState};
pub use session::{ConfigSession, CustomTextureOutcome, SessionError};
pub use shader::{ScanMode, ShaderUniforms};
pub use texture::{
    texture_request, TextureCompleter, TextureError, TextureHandle, TextureLoader, TexturePixels,
    TextureTicket,
};
pub use texture_set::{TextureSelection, TextureSet};
pub use theme::{PanelPalette, Theme};

// Shaders bundled as string constants
pub static SCAN_WGSL: &str = include_str!("../shaders/scan.wgsl");
pub static FLAT_WGSL: &str = include_str!("../shaders/flat.wgsl");
