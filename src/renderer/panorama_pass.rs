//! The single render pass: a textured sphere drawn from the inside.

use wgpu::util::DeviceExt;

use super::sphere_mesh::{SphereMesh, SphereVertex};
use crate::camera::core::ViewUniform;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::PanoramaTexture;

/// Background behind the sphere; visible where the panorama is dimmed.
const CLEAR_COLOR: wgpu::Color = wgpu::Color::WHITE;

/// Pipeline, sphere buffers, view uniform, and the panorama bind group.
pub struct PanoramaPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    view_buffer: wgpu::Buffer,
    view_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
}

impl PanoramaPass {
    /// Upload `mesh` and build the pipeline. Starts with a placeholder
    /// texture.
    #[must_use]
    pub fn new(context: &RenderContext, mesh: &SphereMesh) -> Self {
        let device = &context.device;

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Vertices"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let view_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("View Uniform"),
                contents: bytemuck::bytes_of(&ViewUniform::new()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let view_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("View Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            });
        let view_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("View Bind Group"),
                layout: &view_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: view_buffer.as_entire_binding(),
                }],
            });

        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Panorama Texture Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            });
        let sampler =
            pipeline_helpers::panorama_sampler(device, "Panorama Sampler");
        let texture = PanoramaTexture::placeholder(device, &context.queue);
        let texture_bind_group =
            create_texture_bind_group(device, &texture_layout, &texture, &sampler);

        let pipeline = create_pipeline(
            context,
            &[&view_layout, &texture_layout],
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            view_buffer,
            view_bind_group,
            texture_layout,
            texture_bind_group,
            sampler,
        }
    }

    /// Replace the panorama. The bind group keeps the new texture alive
    /// and the old one is released with the old bind group.
    pub fn set_texture(
        &mut self,
        device: &wgpu::Device,
        texture: &PanoramaTexture,
    ) {
        self.texture_bind_group = create_texture_bind_group(
            device,
            &self.texture_layout,
            texture,
            &self.sampler,
        );
    }

    /// Upload this frame's view uniform.
    pub fn write_view(&self, queue: &wgpu::Queue, view: &ViewUniform) {
        queue.write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(view));
    }

    /// Clear `target` and draw the sphere into it.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Panorama Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.view_bind_group, &[]);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &PanoramaTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Panorama Texture Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// Back-face culled triangle list; the sphere's triangles face inward so
/// only the inside is drawn. No depth buffer: one convex surface.
fn create_pipeline(
    context: &RenderContext,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let device = &context.device;
    let shader = device
        .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/panorama.wgsl"));

    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Panorama Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Panorama Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[SphereVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: context.format(),
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
