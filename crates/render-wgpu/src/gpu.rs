use crate::camera::SceneCamera;
use crate::shaders;
use crate::targets::{BACKFACE_FORMAT, DEPTH_FORMAT, RenderTargets};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use glassfall_assets::{MeshData, TextureData};
use glassfall_common::cover_size;
use glassfall_render::{DiamondShading, FramePlan, PassTarget, RenderLayer};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    resolution: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BackgroundUniforms {
    mvp: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
}

/// Unit plane in the XY plane; the model matrix stretches it to cover size.
fn quad_mesh() -> (Vec<QuadVertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        QuadVertex { position: [-p,  p, 0.0], uv: [0.0, 0.0] },
        QuadVertex { position: [ p,  p, 0.0], uv: [1.0, 0.0] },
        QuadVertex { position: [ p, -p, 0.0], uv: [1.0, 1.0] },
        QuadVertex { position: [-p, -p, 0.0], uv: [0.0, 1.0] },
    ];
    let indices: Vec<u16> = vec![0, 2, 1, 0, 3, 2];
    (vertices, indices)
}

/// Executes the four-pass frame plan with wgpu.
pub struct DiamondRenderer {
    background_pipeline: wgpu::RenderPipeline,
    backface_pipeline: wgpu::RenderPipeline,
    refraction_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    background_buffer: wgpu::Buffer,
    background_bind_group: wgpu::BindGroup,
    refraction_layout: wgpu::BindGroupLayout,
    refraction_bind_group: wgpu::BindGroup,
    map_sampler: wgpu::Sampler,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
    diamond_vertex_buffer: wgpu::Buffer,
    diamond_index_buffer: wgpu::Buffer,
    diamond_index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u32,
    targets: RenderTargets,
    plan: FramePlan,
    surface_format: wgpu::TextureFormat,
}

impl DiamondRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        mesh: &MeshData,
        background: &TextureData,
        instance_capacity: u32,
    ) -> Self {
        // Globals shared by both diamond passes
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                camera_pos: [0.0; 4],
                resolution: [width as f32, height as f32, 0.0, 0.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Bilinear, clamped, no mipmaps; shared by every sampled texture
        let map_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("map_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // Background texture upload (one-time)
        let background_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("background_texture"),
            size: wgpu::Extent3d {
                width: background.width,
                height: background.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &background_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &background.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(background.width * 4),
                rows_per_image: Some(background.height),
            },
            wgpu::Extent3d {
                width: background.width,
                height: background.height,
                depth_or_array_layers: 1,
            },
        );
        let background_view = background_texture.create_view(&Default::default());

        let background_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("background_buffer"),
            contents: bytemuck::bytes_of(&BackgroundUniforms {
                mvp: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let background_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let background_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background_bind_group"),
            layout: &background_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: background_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&background_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&map_sampler),
                },
            ],
        });

        // Refraction inputs: both captures plus the shared sampler. The bind
        // group is rebuilt with the targets on every resize.
        let refraction_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("refraction_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let targets = RenderTargets::new(device, surface_format, width, height);
        let refraction_bind_group =
            Self::refraction_bind_group(device, &refraction_layout, &targets, &map_sampler);

        // Pipelines
        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BACKGROUND_SHADER.into()),
        });
        let backface_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backface_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BACKFACE_SHADER.into()),
        });
        let refraction_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("refraction_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::REFRACTION_SHADER.into()),
        });

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x2,
            ],
        };
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
            ],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x4,
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32x4,
            ],
        };

        let background_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("background_pipeline_layout"),
                bind_group_layouts: &[&background_layout],
                push_constant_ranges: &[],
            });

        // No depth state: the background ignores depth entirely, and the
        // passes that draw it carry no depth attachment.
        let background_pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("background_pipeline"),
                layout: Some(&background_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &background_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[quad_layout],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &background_shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: Default::default(),
                multiview: None,
                cache: None,
            });

        let diamond_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("backface_pipeline_layout"),
                bind_group_layouts: &[&globals_layout],
                push_constant_ranges: &[],
            });

        // Front-face culling inverted: only back faces rasterize.
        let backface_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("backface_pipeline"),
            layout: Some(&diamond_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &backface_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout.clone(), instance_layout.clone()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &backface_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: BACKFACE_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let refraction_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("refraction_pipeline_layout"),
                bind_group_layouts: &[&globals_layout, &refraction_layout],
                push_constant_ranges: &[],
            });

        let refraction_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("refraction_pipeline"),
            layout: Some(&refraction_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &refraction_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout, instance_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &refraction_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Quad geometry
        let (quad_verts, quad_indices) = quad_mesh();
        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&quad_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_index_buffer"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Diamond geometry
        let diamond_verts: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| Vertex {
                position: *p,
                normal: *n,
            })
            .collect();
        let diamond_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("diamond_vertex_buffer"),
            contents: bytemuck::cast_slice(&diamond_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let diamond_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("diamond_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let diamond_index_count = mesh.indices.len() as u32;

        // Instance buffer (pre-allocated, rewritten in full every frame)
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (instance_capacity as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        tracing::info!(
            vertices = diamond_verts.len(),
            indices = diamond_index_count,
            instances = instance_capacity,
            "diamond renderer created"
        );

        Self {
            background_pipeline,
            backface_pipeline,
            refraction_pipeline,
            globals_buffer,
            globals_bind_group,
            background_buffer,
            background_bind_group,
            refraction_layout,
            refraction_bind_group,
            map_sampler,
            quad_vertex_buffer,
            quad_index_buffer,
            diamond_vertex_buffer,
            diamond_index_buffer,
            diamond_index_count,
            instance_buffer,
            instance_capacity,
            targets,
            plan: FramePlan::new(),
            surface_format,
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Pixel dimensions of the offscreen captures.
    pub fn target_size(&self) -> (u32, u32) {
        self.targets.size()
    }

    /// Recreate everything whose size depends on the surface resolution.
    /// The refraction bind group is rebuilt so the old captures can never be
    /// sampled again.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.targets = RenderTargets::new(device, self.surface_format, width, height);
        self.refraction_bind_group = Self::refraction_bind_group(
            device,
            &self.refraction_layout,
            &self.targets,
            &self.map_sampler,
        );
        tracing::debug!(width, height, "renderer resized");
    }

    /// Render one displayed frame: the fixed four-pass plan.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        camera: &SceneCamera,
        instances: &[Mat4],
    ) {
        let (width, height) = self.targets.size();
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: camera.view_projection().to_cols_array_2d(),
                camera_pos: camera.position.extend(1.0).to_array(),
                resolution: [width as f32, height as f32, 0.0, 0.0],
            }),
        );

        // Cover-size the background plane for the current viewport
        let (bg_width, bg_height) = cover_size(camera.aspect, camera.viewport());
        let model = Mat4::from_scale(Vec3::new(bg_width, bg_height, 1.0));
        queue.write_buffer(
            &self.background_buffer,
            0,
            bytemuck::bytes_of(&BackgroundUniforms {
                mvp: (camera.view_projection() * model).to_cols_array_2d(),
            }),
        );

        // Full re-upload of every instance transform, every frame
        let count = instances.len().min(self.instance_capacity as usize);
        let instance_data: Vec<InstanceData> = instances[..count]
            .iter()
            .map(|m| {
                let cols = m.to_cols_array_2d();
                InstanceData {
                    model_0: cols[0],
                    model_1: cols[1],
                    model_2: cols[2],
                    model_3: cols[3],
                }
            })
            .collect();
        if !instance_data.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instance_data));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        for pass_desc in self.plan.passes() {
            let color_view = match pass_desc.target {
                PassTarget::Env => &self.targets.env_view,
                PassTarget::Backface => &self.targets.backface_view,
                PassTarget::Screen => surface_view,
            };
            // Only diamond passes test depth; background passes carry no
            // depth attachment at all.
            let depth_view = match (pass_desc.target, pass_desc.layer) {
                (PassTarget::Backface, _) => Some(&self.targets.backface_depth_view),
                (PassTarget::Screen, RenderLayer::Diamonds) => {
                    Some(&self.targets.screen_depth_view)
                }
                _ => None,
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(pass_desc.label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: if pass_desc.clear_color {
                            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: depth_view.map(|view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view,
                        depth_ops: Some(wgpu::Operations {
                            load: if pass_desc.clear_depth {
                                wgpu::LoadOp::Clear(1.0)
                            } else {
                                wgpu::LoadOp::Load
                            },
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                ..Default::default()
            });

            match pass_desc.layer {
                RenderLayer::Background => {
                    pass.set_pipeline(&self.background_pipeline);
                    pass.set_bind_group(0, &self.background_bind_group, &[]);
                    pass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
                    pass.set_index_buffer(
                        self.quad_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint16,
                    );
                    pass.draw_indexed(0..6, 0, 0..1);
                }
                RenderLayer::Diamonds => {
                    let pipeline = match pass_desc.shading {
                        Some(DiamondShading::Backface) => &self.backface_pipeline,
                        _ => &self.refraction_pipeline,
                    };
                    pass.set_pipeline(pipeline);
                    pass.set_bind_group(0, &self.globals_bind_group, &[]);
                    if pass_desc.shading == Some(DiamondShading::Refraction) {
                        pass.set_bind_group(1, &self.refraction_bind_group, &[]);
                    }
                    pass.set_vertex_buffer(0, self.diamond_vertex_buffer.slice(..));
                    pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                    pass.set_index_buffer(
                        self.diamond_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    if !instance_data.is_empty() {
                        pass.draw_indexed(0..self.diamond_index_count, 0, 0..count as u32);
                    }
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn refraction_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("refraction_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.env_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.backface_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}
