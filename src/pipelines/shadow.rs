use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3, ortho};
use wgpu::util::DeviceExt;

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    scene::DirectionalLight,
};

// Orthographic volume the shadow pass covers, sized to the room.
const SHADOW_HALF_EXTENT: f32 = 40.0;
const SHADOW_NEAR: f32 = 0.1;
const SHADOW_FAR: f32 = 120.0;

/// The shadow map plus the uniforms and bind groups of both passes that
/// touch it: the depth-only pass rendering into it and the main pass
/// sampling from it.
#[derive(Debug)]
pub struct ShadowResources {
    /// Whether the directional light casts at all. When off the map stays
    /// cleared to "fully lit" and the depth pass draws nothing.
    pub enabled: bool,
    pub map: Texture,
    pub uniform: ShadowUniform,
    pub buffer: wgpu::Buffer,
    /// Group 0 of the shadow pass: just the light view-projection.
    pub pass_bind_group_layout: wgpu::BindGroupLayout,
    pub pass_bind_group: wgpu::BindGroup,
    /// Group 3 of the main pass: view-projection, depth map, comparison sampler.
    pub sample_bind_group_layout: wgpu::BindGroupLayout,
    pub sample_bind_group: wgpu::BindGroup,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowUniform {
    light_view_proj: [[f32; 4]; 4],
}

impl ShadowUniform {
    /// Orthographic view-projection looking from the light at the origin.
    pub fn new(sun: &DirectionalLight) -> Self {
        let eye = Point3::from(sun.position);
        let view = Matrix4::look_at_rh(eye, Point3::origin(), Vector3::unit_y());
        let proj = OPENGL_TO_WGPU_MATRIX
            * ortho(
                -SHADOW_HALF_EXTENT,
                SHADOW_HALF_EXTENT,
                -SHADOW_HALF_EXTENT,
                SHADOW_HALF_EXTENT,
                SHADOW_NEAR,
                SHADOW_FAR,
            );
        Self {
            light_view_proj: (proj * view).into(),
        }
    }
}

impl ShadowResources {
    pub fn new(device: &wgpu::Device, sun: &DirectionalLight) -> Self {
        let map = Texture::create_shadow_map(device, "shadow_map");
        let uniform = ShadowUniform::new(sun);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shadow Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let pass_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_entry],
                label: Some("shadow_pass_bind_group_layout"),
            });
        let pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pass_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("shadow_pass_bind_group"),
        });

        let sample_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    uniform_entry,
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Depth,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                        count: None,
                    },
                ],
                label: Some("shadow_sample_bind_group_layout"),
            });
        let sample_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &sample_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&map.sampler),
                },
            ],
            label: Some("shadow_sample_bind_group"),
        });

        Self {
            enabled: sun.cast_shadow,
            map,
            uniform,
            buffer,
            pass_bind_group_layout,
            pass_bind_group,
            sample_bind_group_layout,
            sample_bind_group,
        }
    }
}

/// Depth-only pipeline rendering shadow casters from the light's view.
pub fn mk_shadow_pipeline(
    device: &wgpu::Device,
    pass_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[pass_bind_group_layout],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Shadow Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[ModelVertex::desc(), InstanceRaw::desc()],
            compilation_options: Default::default(),
        },
        // Depth-only: no colour target, no fragment stage.
        fragment: None,
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            // Slope-scaled bias against shadow acne.
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
