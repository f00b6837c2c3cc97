//! Scan-compositing effect.
//!
//! The WGSL program in `shaders/scan.wgsl` is the one the GPU runs; the
//! functions here are its CPU reference, kept term for term identical so
//! tests and headless previews can reason about individual fragments.

use crate::constants::*;
use crate::texture::TextureHandle;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Axis the scan sweeps along. Discriminants match the `scan_mode` uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ScanMode {
    /// Line of constant `uv.y`.
    #[default]
    Horizontal = 0,
    /// Line of constant `uv.x`.
    Vertical = 1,
    /// Ring around the uv center.
    Radial = 2,
}

impl ScanMode {
    pub const ALL: [ScanMode; 3] = [ScanMode::Horizontal, ScanMode::Vertical, ScanMode::Radial];

    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(ScanMode::Horizontal),
            1 => Some(ScanMode::Vertical),
            2 => Some(ScanMode::Radial),
            _ => None,
        }
    }

    /// Same thresholds the fragment stage applies to the float uniform.
    pub fn from_uniform(value: f32) -> Self {
        if value < 0.5 {
            ScanMode::Horizontal
        } else if value < 1.5 {
            ScanMode::Vertical
        } else {
            ScanMode::Radial
        }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            ScanMode::Horizontal => "Horizontal",
            ScanMode::Vertical => "Vertical",
            ScanMode::Radial => "Radial",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % Self::ALL.len()]
    }
}

// GLSL-style helpers --------------------------------------------------------

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

// Effect terms --------------------------------------------------------------

/// `sin(t * speed) * 0.5 + 0.5`; never reset, so it is continuous in `t`.
#[inline]
pub fn scan_progress(elapsed: f32, scan_speed: f32) -> f32 {
    (elapsed * scan_speed).sin() * 0.5 + 0.5
}

/// [`scan_progress`] for a long-running clock kept in f64 seconds.
#[inline]
pub fn scan_progress_at(elapsed: f64, scan_speed: f32) -> f32 {
    ((elapsed * scan_speed as f64).sin() * 0.5 + 0.5) as f32
}

pub fn scan_distance(mode: ScanMode, uv: Vec2, progress: f32) -> f32 {
    match mode {
        ScanMode::Horizontal => (uv.y - progress).abs(),
        ScanMode::Vertical => (uv.x - progress).abs(),
        ScanMode::Radial => {
            let radius = uv.distance(Vec2::from(SCAN_CENTER));
            (radius - progress * RADIAL_SCAN_SCALE).abs()
        }
    }
}

#[inline]
pub fn scan_line(scan_distance: f32) -> f32 {
    1.0 - smoothstep(0.0, SCAN_LINE_WIDTH, scan_distance)
}

/// 0, 1 or 2 depending on how many grid lines pass through `uv`.
pub fn grid(uv: Vec2) -> f32 {
    let g = uv * GRID_DENSITY;
    step(GRID_LINE_THRESHOLD, fract(g.x)) + step(GRID_LINE_THRESHOLD, fract(g.y))
}

/// Classic `fract(sin(dot(st, k)) * 43758.5453123)` hash.
#[inline]
pub fn noise(st: Vec2) -> f32 {
    fract(st.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.545_312_3)
}

pub fn dot_pattern(uv: Vec2, time: f32) -> f32 {
    step(DOT_THRESHOLD, noise(uv * NOISE_SCALE + Vec2::splat(time))) * DOT_INTENSITY
}

/// 1 where the stored depth sits on the scan front, fading to 0 over the mask width.
#[inline]
pub fn scan_mask(depth: f32, progress: f32) -> f32 {
    1.0 - smoothstep(0.0, SCAN_MASK_WIDTH, (depth - progress).abs())
}

/// Parallax skew applied to the color lookup.
#[inline]
pub fn parallax_offset(depth_sample: Vec4, pointer: Vec2) -> Vec2 {
    Vec2::new(depth_sample.x, depth_sample.y) * pointer * PARALLAX_STRENGTH
}

/// Uniform values bound to one mesh instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderUniforms {
    pub color_texture: TextureHandle,
    pub depth_texture: TextureHandle,
    pub pointer: Vec2,
    pub progress: f32,
    pub scan_color: Vec3,
    pub time: f32,
    pub scan_mode: ScanMode,
    pub glitch_intensity: f32,
}

impl ShaderUniforms {
    /// CPU evaluation of the fragment stage at `uv`. Alpha is intentionally
    /// left unclamped, matching the GPU output before blending.
    pub fn shade(&self, uv: Vec2) -> Vec4 {
        let depth_sample = self.depth_texture.pixels.sample(uv);
        let depth = depth_sample.x;
        let offset = parallax_offset(depth_sample, self.pointer);
        let tex = self.color_texture.pixels.sample(uv + offset);

        let distance = scan_distance(self.scan_mode, uv, self.progress);
        let line = scan_line(distance);
        let grid = grid(uv);
        let dots = dot_pattern(uv, self.time);
        let mask = scan_mask(depth, self.progress);

        let c = self.scan_color;
        let glow = line * GLOW_WEIGHT;
        let rgb = tex.truncate()
            + c * mask * SCAN_MASK_COLOR_WEIGHT
            + c * grid * GRID_COLOR_WEIGHT
            + c * dots * mask
            + c * glow;
        let alpha = tex.w
            + mask * SCAN_MASK_ALPHA_WEIGHT
            + grid * GRID_ALPHA_WEIGHT
            + glow * GLOW_ALPHA_WEIGHT;
        rgb.extend(alpha)
    }

    pub fn pack(&self, view_proj: Mat4, model: Mat4) -> ScanUniformsPacked {
        ScanUniformsPacked {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            scan_color: self.scan_color.to_array(),
            progress: self.progress,
            pointer: self.pointer.to_array(),
            time: self.time,
            scan_mode: self.scan_mode.index() as f32,
            glitch_intensity: self.glitch_intensity,
            _pad: [0.0; 3],
        }
    }
}

/// Uniform block layout shared with `scan.wgsl` (176 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScanUniformsPacked {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub scan_color: [f32; 3],
    pub progress: f32,
    pub pointer: [f32; 2],
    pub time: f32,
    pub scan_mode: f32,
    pub glitch_intensity: f32,
    pub _pad: [f32; 3],
}

/// Uniform block for the flat fallback quad (`flat.wgsl`).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniformsPacked {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}
