//! wgpu resources for drawing a [`Frame`].
//!
//! Both front-ends own a surface, device and queue and hand them to
//! [`SceneGpu`]; everything below the surface is shared. Textures are
//! uploaded when the frame's texture handles change and geometry buffers
//! when the mesh revision changes.

mod helpers;

use crate::camera::Camera;
use crate::constants::{FALLBACK_COLOR, FALLBACK_QUAD_SIZE};
use crate::geometry::fallback_quad;
use crate::renderer::Frame;
use crate::shader::{FlatUniformsPacked, ScanUniformsPacked, ShaderUniforms};
use crate::texture::TexturePixels;
use glam::{Mat4, Vec4};
use helpers::MeshBuffers;

/// Which pipeline a prepared frame goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DrawPlan {
    Nothing,
    Flat,
    Scan,
}

struct MaterialBinding {
    color_id: u64,
    depth_id: u64,
    _color: wgpu::Texture,
    _depth: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub struct SceneGpu {
    scan_pipeline: wgpu::RenderPipeline,
    scan_bgl: wgpu::BindGroupLayout,
    scan_uniform_buffer: wgpu::Buffer,
    flat_pipeline: wgpu::RenderPipeline,
    flat_uniform_buffer: wgpu::Buffer,
    flat_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    material: Option<MaterialBinding>,
    mesh: Option<MeshBuffers>,
    fallback: Option<MeshBuffers>,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    camera: Camera,
    max_texture_dim: u32,
    rejected: Option<(u64, u64)>,
}

impl SceneGpu {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let scan_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scan_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCAN_WGSL.into()),
        });
        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::FLAT_WGSL.into()),
        });

        let scan_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scan_bgl"),
            entries: &[
                helpers::uniform_entry(0),
                helpers::texture_entry(1),
                helpers::texture_entry(2),
                helpers::sampler_entry(3),
            ],
        });
        let scan_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scan_pl"),
            bind_group_layouts: &[&scan_bgl],
            push_constant_ranges: &[],
        });
        let scan_pipeline =
            helpers::make_mesh_pipeline(device, "scan_pipeline", &scan_pl, &scan_shader, color_format);
        let scan_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scan_uniforms"),
            size: std::mem::size_of::<ScanUniformsPacked>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let flat_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("flat_bgl"),
            entries: &[helpers::uniform_entry(0)],
        });
        let flat_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flat_pl"),
            bind_group_layouts: &[&flat_bgl],
            push_constant_ranges: &[],
        });
        let flat_pipeline =
            helpers::make_mesh_pipeline(device, "flat_pipeline", &flat_pl, &flat_shader, color_format);
        let flat_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("flat_uniforms"),
            size: std::mem::size_of::<FlatUniformsPacked>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let flat_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("flat_bg"),
            layout: &flat_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: flat_uniform_buffer.as_entire_binding(),
            }],
        });

        let (_depth_tex, depth_view) = helpers::create_depth_target(device, width, height);
        let fallback = MeshBuffers::new(device, "fallback_quad", &fallback_quad(FALLBACK_QUAD_SIZE), 0);

        Self {
            scan_pipeline,
            scan_bgl,
            scan_uniform_buffer,
            flat_pipeline,
            flat_uniform_buffer,
            flat_bind_group,
            sampler: helpers::create_linear_sampler(device),
            material: None,
            mesh: None,
            fallback,
            _depth_tex,
            depth_view,
            camera: Camera::scene(width, height),
            max_texture_dim: device.limits().max_texture_dimension_2d,
            rejected: None,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        (self._depth_tex, self.depth_view) = helpers::create_depth_target(device, width, height);
        self.camera.resize(width, height);
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    fn ensure_material(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniforms: &ShaderUniforms,
    ) -> bool {
        let (color, depth) = (&uniforms.color_texture, &uniforms.depth_texture);
        if let Some(m) = &self.material {
            if m.color_id == color.id && m.depth_id == depth.id {
                return true;
            }
        }
        if self.rejected == Some((color.id, depth.id)) {
            return false;
        }
        for handle in [color, depth] {
            let p = &handle.pixels;
            if exceeds_limit(p, self.max_texture_dim) {
                log::warn!(
                    "[renderer] {} is {}x{}, above the device limit of {}",
                    handle.locator,
                    p.width,
                    p.height,
                    self.max_texture_dim
                );
                self.material = None;
                self.rejected = Some((color.id, depth.id));
                return false;
            }
        }
        let (color_tex, color_view) = helpers::upload_texture(device, queue, "color_tex", &color.pixels);
        let (depth_tex, depth_view) = helpers::upload_texture(device, queue, "depth_tex", &depth.pixels);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scan_bg"),
            layout: &self.scan_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.scan_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.material = Some(MaterialBinding {
            color_id: color.id,
            depth_id: depth.id,
            _color: color_tex,
            _depth: depth_tex,
            bind_group,
        });
        true
    }

    fn write_flat(&self, queue: &wgpu::Queue, view_proj: Mat4, color: Vec4) {
        let packed = FlatUniformsPacked {
            mvp: view_proj.to_cols_array_2d(),
            color: color.to_array(),
        };
        queue.write_buffer(&self.flat_uniform_buffer, 0, bytemuck::bytes_of(&packed));
    }

    /// Upload whatever `frame` needs and write this frame's uniforms.
    fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &Frame) -> DrawPlan {
        let view_proj = self.camera.view_proj();
        let mut material_ready = false;
        match frame {
            Frame::Fallback { color, .. } => self.write_flat(queue, view_proj, *color),
            Frame::Effect {
                mesh,
                mesh_revision,
                model,
                uniforms,
            } => {
                if self.mesh.as_ref().map(|m| m.revision) != Some(*mesh_revision) {
                    self.mesh = MeshBuffers::new(device, "scene_mesh", mesh, *mesh_revision);
                }
                material_ready = self.ensure_material(device, queue, uniforms);
                if material_ready {
                    let packed = uniforms.pack(view_proj, *model);
                    queue.write_buffer(&self.scan_uniform_buffer, 0, bytemuck::bytes_of(&packed));
                } else {
                    self.write_flat(queue, view_proj, Vec4::from(FALLBACK_COLOR));
                }
            }
        }
        choose_plan(frame, material_ready, self.mesh.is_some(), self.fallback.is_some())
    }

    /// Record and submit one pass drawing `frame` into `target`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
        frame: &Frame,
    ) {
        let plan = self.prepare(device, queue, frame);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            match plan {
                DrawPlan::Nothing => {}
                DrawPlan::Flat => {
                    if let Some(quad) = &self.fallback {
                        rpass.set_pipeline(&self.flat_pipeline);
                        rpass.set_bind_group(0, &self.flat_bind_group, &[]);
                        draw_mesh(&mut rpass, quad);
                    }
                }
                DrawPlan::Scan => {
                    if let (Some(mesh), Some(material)) = (&self.mesh, &self.material) {
                        rpass.set_pipeline(&self.scan_pipeline);
                        rpass.set_bind_group(0, &material.bind_group, &[]);
                        draw_mesh(&mut rpass, mesh);
                    }
                }
            }
        }
        queue.submit(Some(encoder.finish()));
    }
}

#[inline]
fn exceeds_limit(pixels: &TexturePixels, max_dim: u32) -> bool {
    pixels.width > max_dim || pixels.height > max_dim
}

/// Effect frames whose textures the device rejected fall back to the flat quad.
fn choose_plan(frame: &Frame, material_ready: bool, has_mesh: bool, has_fallback: bool) -> DrawPlan {
    match frame {
        Frame::Effect { .. } if material_ready => {
            if has_mesh {
                DrawPlan::Scan
            } else {
                DrawPlan::Nothing
            }
        }
        _ if has_fallback => DrawPlan::Flat,
        _ => DrawPlan::Nothing,
    }
}

fn draw_mesh(rpass: &mut wgpu::RenderPass<'_>, buffers: &MeshBuffers) {
    rpass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
    rpass.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..buffers.index_count, 0, 0..1);
}
