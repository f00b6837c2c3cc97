// Shared effect/interaction tuning constants used by both web and native frontends.

// Parallax and scan band
pub const PARALLAX_STRENGTH: f32 = 0.02; // uv skew per unit of depth.rg * pointer
pub const SCAN_LINE_WIDTH: f32 = 0.05; // uv units over which the scan line fades out
pub const SCAN_MASK_WIDTH: f32 = 0.02; // depth band around progress that lights up
pub const RADIAL_SCAN_SCALE: f32 = 0.7; // radial mode maps progress 0..1 to radius 0..0.7
pub const SCAN_CENTER: [f32; 2] = [0.5, 0.5];

// Grid overlay
pub const GRID_DENSITY: f32 = 80.0; // cells per uv unit on each axis
pub const GRID_LINE_THRESHOLD: f32 = 0.98;

// Noise dithering
pub const NOISE_SCALE: f32 = 150.0;
pub const DOT_THRESHOLD: f32 = 0.5;
pub const DOT_INTENSITY: f32 = 0.3;

// Composite weights
pub const SCAN_MASK_COLOR_WEIGHT: f32 = 2.0;
pub const GRID_COLOR_WEIGHT: f32 = 0.3;
pub const GLOW_WEIGHT: f32 = 0.5;
pub const SCAN_MASK_ALPHA_WEIGHT: f32 = 0.8;
pub const GRID_ALPHA_WEIGHT: f32 = 0.2;
pub const GLOW_ALPHA_WEIGHT: f32 = 0.5;

// Motion
pub const AUTO_ROTATE_RATE: f32 = 0.2; // radians per second around +Y
pub const SHADER_TIME_PERIOD: f64 = 3600.0; // seconds; the dot noise input wraps here

// Title reveal timing
pub const WORD_REVEAL_DELAY_MS: u64 = 400;
pub const SUBTITLE_REVEAL_DELAY_MS: u64 = 600;

// Object scale slider range
pub const SCALE_MIN: f32 = 0.1;
pub const SCALE_MAX: f32 = 10.0;
pub const SCALE_STEP: f32 = 0.1;

// Baseline object config restored by "Reset Defaults"
pub const DEFAULT_OBJECT_SCALE: [f32; 3] = [3.0, 3.0, 1.0];

// Initial live selection
pub const DEFAULT_THEME_ID: &str = "cyberpunk";
pub const DEFAULT_TEXTURE_SET_ID: &str = "face";

// Fallback visual while textures are pending
pub const FALLBACK_QUAD_SIZE: f32 = 2.0;
pub const FALLBACK_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // flat red

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Custom texture override display name
pub const CUSTOM_TEXTURE_SET_NAME: &str = "Custom";
