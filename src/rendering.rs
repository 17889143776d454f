//! Rendering system with wgpu line pipeline and per-surface buffers.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::error::{Error, Result};
use crate::scene::{MeshInstance, Scene};
use crate::terrain::Vertex;

/// Uniform buffer for one mesh instance (model-view-projection + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshUniforms {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl MeshUniforms {
    pub fn for_mesh(mesh: &MeshInstance, view_proj: Mat4) -> Self {
        Self {
            mvp: (view_proj * mesh.model_matrix()).to_cols_array_2d(),
            color: mesh.color.to_linear_rgba(),
        }
    }
}

/// GPU copy of a scene surface
struct GpuSurface {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Uniforms and bind group for a scene mesh
struct GpuMesh {
    surface: usize,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Rendering system managing wgpu device, pipeline, and buffers
pub struct RenderSystem {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    surfaces: Vec<GpuSurface>,
    meshes: Vec<GpuMesh>,
}

impl RenderSystem {
    /// Create new rendering system with buffers for every surface in `scene`
    pub async fn new(window: Arc<winit::window::Window>, scene: &Scene) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::Gpu(format!("failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| Error::Gpu("no suitable GPU adapter".to_string()))?;

        log::info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| Error::Gpu(format!("failed to request device: {}", e)))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| Error::Gpu("surface reports no formats".to_string()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wireframe Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wireframe Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wireframe Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    }],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let surfaces = scene
            .surfaces
            .iter()
            .map(|s| GpuSurface {
                vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} vertices", s.label)),
                    contents: bytemuck::cast_slice(&s.buffer.vertices),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                }),
                index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} edges", s.label)),
                    contents: bytemuck::cast_slice(&s.edges),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: s.edges.len() as u32,
            })
            .collect();

        let meshes = scene
            .meshes
            .iter()
            .map(|m| {
                let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} uniforms", m.label)),
                    contents: bytemuck::cast_slice(&[MeshUniforms::for_mesh(m, Mat4::IDENTITY)]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{} bind group", m.label)),
                    layout: &uniform_bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });
                GpuMesh {
                    surface: m.surface,
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            surfaces,
            meshes,
        })
    }

    /// Reconfigure the swapchain for a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reconfigure with the current size (after surface loss)
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload every dirty surface and clear its dirty flag
    pub fn upload(&self, scene: &mut Scene) {
        for (gpu, surface) in self.surfaces.iter().zip(scene.surfaces.iter_mut()) {
            if surface.buffer.take_dirty() {
                self.queue.write_buffer(
                    &gpu.vertex_buffer,
                    0,
                    bytemuck::cast_slice(&surface.buffer.vertices),
                );
            }
        }
    }

    /// Update per-mesh uniforms for this frame's camera
    pub fn update_uniforms(&self, scene: &Scene, view_proj: Mat4) {
        for (gpu, mesh) in self.meshes.iter().zip(&scene.meshes) {
            let uniforms = MeshUniforms::for_mesh(mesh, view_proj);
            self.queue
                .write_buffer(&gpu.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        }
    }

    /// Render a frame
    pub fn render(&self) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            for mesh in &self.meshes {
                let Some(surface) = self.surfaces.get(mesh.surface) else {
                    continue;
                };
                if surface.index_count == 0 {
                    continue;
                }
                render_pass.set_bind_group(0, &mesh.bind_group, &[]);
                render_pass.set_vertex_buffer(0, surface.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(surface.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..surface.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Rgb, VisualConfig};
    use crate::scene::SceneDescriptor;
    use glam::Vec3;

    #[test]
    fn test_uniform_layout() {
        // mat4x4 + vec4, no padding needed
        assert_eq!(std::mem::size_of::<MeshUniforms>(), 80);
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
    }

    #[test]
    fn test_mesh_uniforms() {
        let config = VisualConfig {
            object_color: Rgb(0xffffff),
            ..VisualConfig::default()
        };
        let scene = Scene::build(&SceneDescriptor::arena(), &config).unwrap();
        let floor = scene.meshes.iter().find(|m| m.label == "floor").unwrap();

        let uniforms = MeshUniforms::for_mesh(floor, Mat4::IDENTITY);
        let mvp = Mat4::from_cols_array_2d(&uniforms.mvp);
        let origin = mvp.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, -200.0, 0.0)).length() < 1e-4);
        assert_eq!(uniforms.color, config.plane_color.to_linear_rgba());

        let object = MeshUniforms::for_mesh(scene.object().unwrap(), Mat4::IDENTITY);
        assert_eq!(object.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
