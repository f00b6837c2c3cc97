//! Scene renderer state.
//!
//! Owns the live [`SceneConfig`], the single focal mesh and the two texture
//! acquisitions that back the scan material. Every host frame calls
//! [`SceneRenderer::tick`], which yields either the flat fallback quad (while
//! textures are pending or failed) or the full effect with fresh uniforms.

use crate::config::{ConfigField, ConfigListener, SceneConfig};
use crate::constants::{AUTO_ROTATE_RATE, FALLBACK_COLOR, FALLBACK_QUAD_SIZE, SHADER_TIME_PERIOD};
use crate::geometry::{build_mesh, fallback_quad, GeometryArgs, GeometryKind, Mesh};
use crate::shader::{scan_progress_at, ShaderUniforms};
use crate::texture::{TextureError, TextureHandle, TextureLoader, TextureTicket};
use crate::texture_set::TextureLocators;
use glam::{Mat4, Quat, Vec2, Vec4};
use std::f32::consts::TAU;
use std::sync::Arc;

enum TextureSlot {
    Waiting(TextureTicket),
    Ready(TextureHandle),
    Failed(TextureError),
}

impl TextureSlot {
    fn handle(&self) -> Option<&TextureHandle> {
        match self {
            TextureSlot::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    fn error(&self) -> Option<&TextureError> {
        match self {
            TextureSlot::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// What the host should draw this frame.
#[derive(Debug)]
pub enum Frame<'a> {
    /// Flat-colored quad shown until both textures resolve.
    Fallback { mesh: &'a Mesh, color: Vec4 },
    /// The scan material on the configured geometry.
    Effect {
        mesh: &'a Mesh,
        mesh_revision: u64,
        model: Mat4,
        uniforms: ShaderUniforms,
    },
}

impl Frame<'_> {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Frame::Fallback { .. })
    }

    pub fn uniforms(&self) -> Option<&ShaderUniforms> {
        match self {
            Frame::Effect { uniforms, .. } => Some(uniforms),
            Frame::Fallback { .. } => None,
        }
    }
}

pub struct SceneRenderer<L: TextureLoader> {
    loader: L,
    config: SceneConfig,
    locators: TextureLocators,
    color: TextureSlot,
    depth: TextureSlot,
    failure_logged: bool,
    next_texture_id: u64,
    mesh: Mesh,
    mesh_source: (GeometryKind, GeometryArgs),
    mesh_revision: u64,
    fallback: Mesh,
    rotation_y: f32,
    /// Seconds since construction; f64 so frame deltas still register after days.
    elapsed: f64,
}

impl<L: TextureLoader> SceneRenderer<L> {
    pub fn new(config: SceneConfig, mut loader: L) -> Self {
        let locators = config.texture.resolve().locators();
        log::info!(
            "[renderer] acquiring textures {} / {}",
            locators.color,
            locators.depth
        );
        let color = TextureSlot::Waiting(loader.load(&locators.color));
        let depth = TextureSlot::Waiting(loader.load(&locators.depth));
        let mesh_source = (config.object.geometry, config.object.geometry_args.clone());
        let mesh = build_mesh(mesh_source.0, &mesh_source.1);
        Self {
            loader,
            config,
            locators,
            color,
            depth,
            failure_logged: false,
            next_texture_id: 1,
            mesh,
            mesh_source,
            mesh_revision: 1,
            fallback: fallback_quad(FALLBACK_QUAD_SIZE),
            rotation_y: 0.0,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Replace the live configuration. Textures are re-requested only when the
    /// resolved locators differ and the mesh is rebuilt only when its kind or
    /// arguments differ; everything else is picked up on the next tick.
    pub fn reconfigure(&mut self, config: SceneConfig) {
        let locators = config.texture.resolve().locators();
        if locators != self.locators {
            log::info!(
                "[renderer] acquiring textures {} / {}",
                locators.color,
                locators.depth
            );
            self.color = TextureSlot::Waiting(self.loader.load(&locators.color));
            self.depth = TextureSlot::Waiting(self.loader.load(&locators.depth));
            self.locators = locators;
            self.failure_logged = false;
        }

        let source = (config.object.geometry, config.object.geometry_args.clone());
        if source != self.mesh_source {
            self.mesh = build_mesh(source.0, &source.1);
            self.mesh_source = source;
            self.mesh_revision += 1;
            log::debug!(
                "[renderer] rebuilt {} mesh ({} triangles)",
                self.mesh_source.0,
                self.mesh.triangle_count()
            );
        }

        self.config = config;
    }

    /// Move finished acquisitions out of their tickets.
    pub fn poll_textures(&mut self) {
        let next_id = &mut self.next_texture_id;
        for slot in [&mut self.color, &mut self.depth] {
            let TextureSlot::Waiting(ticket) = slot else {
                continue;
            };
            match ticket.try_take() {
                None => {}
                Some(Ok(pixels)) => {
                    log::info!(
                        "[renderer] texture ready: {} ({}x{})",
                        ticket.locator(),
                        pixels.width,
                        pixels.height
                    );
                    let handle = TextureHandle {
                        id: *next_id,
                        locator: Arc::from(ticket.locator()),
                        pixels: Arc::new(pixels),
                    };
                    *next_id += 1;
                    *slot = TextureSlot::Ready(handle);
                }
                Some(Err(err)) => *slot = TextureSlot::Failed(err),
            }
        }

        if !self.failure_logged {
            if let Some(err) = self.texture_failure() {
                log::warn!("[renderer] texture unavailable, keeping fallback: {err}");
                self.failure_logged = true;
            }
        }
    }

    #[inline]
    pub fn textures_ready(&self) -> bool {
        self.color.handle().is_some() && self.depth.handle().is_some()
    }

    pub fn texture_failure(&self) -> Option<&TextureError> {
        self.color.error().or_else(|| self.depth.error())
    }

    #[inline]
    pub fn locators(&self) -> &TextureLocators {
        &self.locators
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Current yaw in [0, 2π).
    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// Scan front position for the current elapsed time.
    pub fn progress(&self) -> f32 {
        scan_progress_at(self.elapsed, self.config.theme().scan_speed)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.config.object.scale_vec3(),
            Quat::from_rotation_y(self.rotation_y),
            glam::Vec3::ZERO,
        )
    }

    /// Advance by `dt` seconds with the host pointer in [-1, 1].
    pub fn tick(&mut self, dt: f32, pointer: Vec2) -> Frame<'_> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt as f64;
        if self.config.auto_rotate {
            self.rotation_y = (self.rotation_y + dt * AUTO_ROTATE_RATE).rem_euclid(TAU);
        }
        self.poll_textures();

        let (Some(color), Some(depth)) = (self.color.handle(), self.depth.handle()) else {
            return Frame::Fallback {
                mesh: &self.fallback,
                color: Vec4::from(FALLBACK_COLOR),
            };
        };

        let theme = self.config.theme();
        let uniforms = ShaderUniforms {
            color_texture: color.clone(),
            depth_texture: depth.clone(),
            pointer,
            progress: scan_progress_at(self.elapsed, theme.scan_speed),
            scan_color: theme.scan_color_vec3(),
            time: self.elapsed.rem_euclid(SHADER_TIME_PERIOD) as f32,
            scan_mode: self.config.scan_mode,
            glitch_intensity: theme.glitch_intensity,
        };
        Frame::Effect {
            mesh: &self.mesh,
            mesh_revision: self.mesh_revision,
            model: self.model_matrix(),
            uniforms,
        }
    }
}

impl<L: TextureLoader> ConfigListener for SceneRenderer<L> {
    fn config_committed(&mut self, config: &SceneConfig, changes: &[ConfigField]) {
        if changes.is_empty() {
            return;
        }
        self.reconfigure(config.clone());
    }
}
