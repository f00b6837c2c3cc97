//! Geometry catalog and CPU-side mesh generation.
//!
//! Each [`GeometryKind`] carries an ordered list of editable arguments with
//! defaults and labels. Edited argument vectors are resolved slot by slot
//! against those defaults before a mesh is built, so a short, long or
//! partially invalid vector still produces usable geometry.

use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

/// Argument vector as edited in a panel or passed to [`build_mesh`].
pub type GeometryArgs = SmallVec<[f32; 4]>;

// Upper bound on any segment slot; keeps buffers bounded for typo'd inputs
pub const MAX_SEGMENTS: u32 = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GeometryKind {
    #[default]
    Plane,
    Sphere,
    Box,
    Cylinder,
    Torus,
    Cone,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotKind {
    /// Linear size; any finite non-negative value.
    Extent,
    /// Tessellation count; floored and clamped to `[min, MAX_SEGMENTS]`.
    Segments { min: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArgSpec {
    pub label: &'static str,
    pub default: f32,
    pub slot: SlotKind,
}

const fn extent(label: &'static str, default: f32) -> ArgSpec {
    ArgSpec {
        label,
        default,
        slot: SlotKind::Extent,
    }
}

const fn segments(label: &'static str, default: f32, min: u32) -> ArgSpec {
    ArgSpec {
        label,
        default,
        slot: SlotKind::Segments { min },
    }
}

const PLANE_ARGS: &[ArgSpec] = &[
    extent("Width", 1.0),
    extent("Height", 1.0),
    segments("Width Segments", 64.0, 1),
    segments("Height Segments", 64.0, 1),
];
const SPHERE_ARGS: &[ArgSpec] = &[
    extent("Radius", 1.0),
    segments("Width Segments", 32.0, 3),
    segments("Height Segments", 32.0, 2),
];
const BOX_ARGS: &[ArgSpec] = &[
    extent("Width", 1.0),
    extent("Height", 1.0),
    extent("Depth", 1.0),
];
const CYLINDER_ARGS: &[ArgSpec] = &[
    extent("Top Radius", 1.0),
    extent("Bottom Radius", 1.0),
    extent("Height", 2.0),
    segments("Radial Segments", 32.0, 3),
];
const TORUS_ARGS: &[ArgSpec] = &[
    extent("Radius", 1.0),
    extent("Tube", 0.4),
    segments("Radial Segments", 16.0, 2),
    segments("Tubular Segments", 32.0, 3),
];
const CONE_ARGS: &[ArgSpec] = &[
    extent("Radius", 1.0),
    extent("Height", 2.0),
    segments("Radial Segments", 32.0, 3),
];

impl GeometryKind {
    pub const ALL: [GeometryKind; 6] = [
        GeometryKind::Plane,
        GeometryKind::Sphere,
        GeometryKind::Box,
        GeometryKind::Cylinder,
        GeometryKind::Torus,
        GeometryKind::Cone,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GeometryKind::Plane => "plane",
            GeometryKind::Sphere => "sphere",
            GeometryKind::Box => "box",
            GeometryKind::Cylinder => "cylinder",
            GeometryKind::Torus => "torus",
            GeometryKind::Cone => "cone",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Plane => "Plane",
            GeometryKind::Sphere => "Sphere",
            GeometryKind::Box => "Box",
            GeometryKind::Cylinder => "Cylinder",
            GeometryKind::Torus => "Torus",
            GeometryKind::Cone => "Cone",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Unknown names render as a plane.
    pub fn from_id_or_plane(id: &str) -> Self {
        Self::from_id(id).unwrap_or(GeometryKind::Plane)
    }

    pub fn arg_specs(self) -> &'static [ArgSpec] {
        match self {
            GeometryKind::Plane => PLANE_ARGS,
            GeometryKind::Sphere => SPHERE_ARGS,
            GeometryKind::Box => BOX_ARGS,
            GeometryKind::Cylinder => CYLINDER_ARGS,
            GeometryKind::Torus => TORUS_ARGS,
            GeometryKind::Cone => CONE_ARGS,
        }
    }

    pub fn default_args(self) -> GeometryArgs {
        self.arg_specs().iter().map(|s| s.default).collect()
    }

    pub fn arg_labels(self) -> impl Iterator<Item = &'static str> {
        self.arg_specs().iter().map(|s| s.label)
    }

    #[inline]
    pub fn arg_count(self) -> usize {
        self.arg_specs().len()
    }

    /// Next kind in catalog order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl SlotKind {
    /// Returns the usable value for this slot, or `None` when the caller
    /// should fall back to the slot default.
    fn accept(self, value: f32) -> Option<f32> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        match self {
            SlotKind::Extent => Some(value),
            SlotKind::Segments { min } => {
                Some((value.floor() as u32).clamp(min, MAX_SEGMENTS) as f32)
            }
        }
    }
}

/// Resolve an edited argument vector against the kind's defaults.
///
/// Empty means "all defaults". Missing, non-finite or negative slots take the
/// default for that slot; extra trailing values are ignored.
pub fn resolve_args(kind: GeometryKind, args: &[f32]) -> GeometryArgs {
    let specs = kind.arg_specs();
    if !args.is_empty() && args.len() != specs.len() {
        log::debug!(
            "[geometry] {} expects {} args, got {}; filling per slot",
            kind,
            specs.len(),
            args.len()
        );
    }
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            args.get(i)
                .and_then(|&v| spec.slot.accept(v))
                .unwrap_or(spec.default)
        })
        .collect()
}

/// Interleaved vertex consumed by the scan pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side triangle mesh; uv `(0, 0)` is the bottom-left of the texture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn with_capacity(v: usize, i: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(v),
            indices: Vec::with_capacity(i),
        }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    fn push(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        self.vertices.push(Vertex {
            position,
            normal,
            uv,
        });
        (self.vertices.len() - 1) as u32
    }

    #[inline]
    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

/// Build a mesh for `kind` from an argument vector (resolved internally).
pub fn build_mesh(kind: GeometryKind, args: &[f32]) -> Mesh {
    let a = resolve_args(kind, args);
    match kind {
        GeometryKind::Plane => plane(a[0], a[1], a[2] as u32, a[3] as u32),
        GeometryKind::Sphere => sphere(a[0], a[1] as u32, a[2] as u32),
        GeometryKind::Box => cuboid(a[0], a[1], a[2]),
        GeometryKind::Cylinder => cylinder(a[0], a[1], a[2], a[3] as u32),
        GeometryKind::Torus => torus(a[0], a[1], a[2] as u32, a[3] as u32),
        GeometryKind::Cone => cylinder(0.0, a[0], a[1], a[2] as u32),
    }
}

/// The fixed quad drawn while textures are pending.
pub fn fallback_quad(size: f32) -> Mesh {
    plane(size, size, 1, 1)
}

fn plane(width: f32, height: f32, grid_x: u32, grid_y: u32) -> Mesh {
    let (gx, gy) = (grid_x.max(1), grid_y.max(1));
    let mut mesh = Mesh::with_capacity(((gx + 1) * (gy + 1)) as usize, (gx * gy * 6) as usize);
    let (hw, hh) = (width * 0.5, height * 0.5);
    let (sw, sh) = (width / gx as f32, height / gy as f32);
    for iy in 0..=gy {
        let y = iy as f32 * sh - hh;
        for ix in 0..=gx {
            let x = ix as f32 * sw - hw;
            mesh.push(
                [x, -y, 0.0],
                [0.0, 0.0, 1.0],
                [ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32],
            );
        }
    }
    let row = gx + 1;
    for iy in 0..gy {
        for ix in 0..gx {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = (ix + 1) + row * (iy + 1);
            let d = (ix + 1) + row * iy;
            mesh.tri(a, b, d);
            mesh.tri(b, c, d);
        }
    }
    mesh
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let (ws, hs) = (width_segments.max(3), height_segments.max(2));
    let mut mesh = Mesh::with_capacity(((ws + 1) * (hs + 1)) as usize, (ws * hs * 6) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let (sin_t, cos_t) = (v * PI).sin_cos();
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let (sin_p, cos_p) = (u * TAU).sin_cos();
            let n = [-cos_p * sin_t, cos_t, sin_p * sin_t];
            mesh.push(
                [n[0] * radius, n[1] * radius, n[2] * radius],
                n,
                [u, 1.0 - v],
            );
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = row * iy + ix + 1;
            let b = row * iy + ix;
            let c = row * (iy + 1) + ix;
            let d = row * (iy + 1) + ix + 1;
            // Pole rows collapse to single triangles
            if iy != 0 {
                mesh.tri(a, b, d);
            }
            if iy != hs - 1 {
                mesh.tri(b, c, d);
            }
        }
    }
    mesh
}

fn cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = Mesh::with_capacity(24, 36);
    // (normal, right, up) with right x up == normal so quads wind CCW
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -hz], [0.0, hy, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, hz], [0.0, hy, 0.0]),
        ([0.0, 1.0, 0.0], [hx, 0.0, 0.0], [0.0, 0.0, -hz]),
        ([0.0, -1.0, 0.0], [hx, 0.0, 0.0], [0.0, 0.0, hz]),
        ([0.0, 0.0, 1.0], [hx, 0.0, 0.0], [0.0, hy, 0.0]),
        ([0.0, 0.0, -1.0], [-hx, 0.0, 0.0], [0.0, hy, 0.0]),
    ];
    for (n, r, u) in faces {
        let center = [n[0] * hx, n[1] * hy, n[2] * hz];
        let corner = |sr: f32, su: f32| {
            [
                center[0] + r[0] * sr + u[0] * su,
                center[1] + r[1] * sr + u[1] * su,
                center[2] + r[2] * sr + u[2] * su,
            ]
        };
        let i0 = mesh.push(corner(-1.0, -1.0), n, [0.0, 0.0]);
        let i1 = mesh.push(corner(1.0, -1.0), n, [1.0, 0.0]);
        let i2 = mesh.push(corner(1.0, 1.0), n, [1.0, 1.0]);
        let i3 = mesh.push(corner(-1.0, 1.0), n, [0.0, 1.0]);
        mesh.tri(i0, i1, i2);
        mesh.tri(i0, i2, i3);
    }
    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Mesh {
    let rs = radial_segments.max(3);
    let half = height * 0.5;
    let mut mesh = Mesh::with_capacity((rs as usize + 1) * 6, rs as usize * 12);
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    // Side wall, one height segment
    for iy in 0..=1u32 {
        let v = iy as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for ix in 0..=rs {
            let u = ix as f32 / rs as f32;
            let (sin_t, cos_t) = (u * TAU).sin_cos();
            let n = normalize([sin_t, slope, cos_t]);
            mesh.push(
                [radius * sin_t, -v * height + half, radius * cos_t],
                n,
                [u, 1.0 - v],
            );
        }
    }
    let row = rs + 1;
    for ix in 0..rs {
        let a = ix;
        let b = row + ix;
        let c = row + ix + 1;
        let d = ix + 1;
        mesh.tri(a, b, d);
        mesh.tri(b, c, d);
    }

    if radius_top > 0.0 {
        cap(&mut mesh, radius_top, half, rs, true);
    }
    if radius_bottom > 0.0 {
        cap(&mut mesh, radius_bottom, half, rs, false);
    }
    mesh
}

fn cap(mesh: &mut Mesh, radius: f32, half: f32, rs: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let n = [0.0, sign, 0.0];
    let center_start = mesh.vertices.len() as u32;
    for _ in 0..rs {
        mesh.push([0.0, half * sign, 0.0], n, [0.5, 0.5]);
    }
    let rim_start = mesh.vertices.len() as u32;
    for ix in 0..=rs {
        let u = ix as f32 / rs as f32;
        let (sin_t, cos_t) = (u * TAU).sin_cos();
        mesh.push(
            [radius * sin_t, half * sign, radius * cos_t],
            n,
            [cos_t * 0.5 + 0.5, sin_t * 0.5 * sign + 0.5],
        );
    }
    for ix in 0..rs {
        let c = center_start + ix;
        let i = rim_start + ix;
        if top {
            mesh.tri(i, i + 1, c);
        } else {
            mesh.tri(i + 1, i, c);
        }
    }
}

fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let (rs, ts) = (radial_segments.max(2), tubular_segments.max(3));
    let mut mesh = Mesh::with_capacity(((rs + 1) * (ts + 1)) as usize, (rs * ts * 6) as usize);
    for j in 0..=rs {
        let v = j as f32 / rs as f32 * TAU;
        let (sin_v, cos_v) = v.sin_cos();
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * TAU;
            let (sin_u, cos_u) = u.sin_cos();
            let p = [
                (radius + tube * cos_v) * cos_u,
                (radius + tube * cos_v) * sin_u,
                tube * sin_v,
            ];
            let center = [radius * cos_u, radius * sin_u, 0.0];
            let n = normalize([p[0] - center[0], p[1] - center[1], p[2] - center[2]]);
            mesh.push(p, n, [i as f32 / ts as f32, j as f32 / rs as f32]);
        }
    }
    let row = ts + 1;
    for j in 1..=rs {
        for i in 1..=ts {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.tri(a, b, d);
            mesh.tri(b, c, d);
        }
    }
    mesh
}

#[inline]
fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}
