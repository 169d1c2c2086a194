use crate::dom::ShaderSources;
use particle_core::{
    ParticleError, ParticleField, PerspectiveCamera, Renderer, SpriteImage, Viewport,
};
use particle_core::constants::POINT_SCALE;
use web_sys as web;
use wgpu;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    color: [f32; 4],
    viewport: [f32; 2],
    point_scale: f32,
    _pad: f32,
}

/// WebGPU point-cloud renderer drawing one textured quad per particle.
pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    sprite_tex: wgpu::Texture,

    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    size_buffer: wgpu::Buffer,
    capacity: usize,

    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        viewport: &Viewport,
        shaders: &ShaderSources,
        sprite: &SpriteImage,
        particles: usize,
    ) -> anyhow::Result<Self> {
        let (width, height) = viewport.physical_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: helpers::pick_alpha_mode(&caps),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_vs"),
            source: wgpu::ShaderSource::Wgsl(shaders.vertex.as_str().into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_fs"),
            source: wgpu::ShaderSource::Wgsl(shaders.fragment.as_str().into()),
        });

        let (sprite_tex, sprite_view) = helpers::create_sprite_texture(&device, &queue, sprite);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particle_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    // uniforms
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // point sprite
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particle_bg"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&sprite_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let f32_size = std::mem::size_of::<f32>() as u64;
        let instance_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: 3 * f32_size,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: 3 * f32_size,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![1 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: f32_size,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![2 => Float32],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                buffers: &instance_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            // no depth test: every sprite blends over the others
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(helpers::additive_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let position_buffer = helpers::create_instance_buffer(&device, "positions", particles, 3);
        let color_buffer = helpers::create_instance_buffer(&device, "custom_colors", particles, 3);
        let size_buffer = helpers::create_instance_buffer(&device, "sizes", particles, 1);

        log::info!(
            "[gpu] ready format={:?} size={}x{} particles={}",
            format,
            width,
            height,
            particles
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            sprite_tex,
            position_buffer,
            color_buffer,
            size_buffer,
            capacity: particles,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    fn ensure_capacity(&mut self, particles: usize) {
        if particles <= self.capacity {
            return;
        }
        self.position_buffer =
            helpers::create_instance_buffer(&self.device, "positions", particles, 3);
        self.color_buffer =
            helpers::create_instance_buffer(&self.device, "custom_colors", particles, 3);
        self.size_buffer = helpers::create_instance_buffer(&self.device, "sizes", particles, 1);
        self.capacity = particles;
    }

    fn upload(&mut self, field: &mut ParticleField) {
        let count = field.buffer().len();
        self.ensure_capacity(count);
        let buf = field.buffer();
        self.queue
            .write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(&buf.positions));
        self.queue
            .write_buffer(&self.color_buffer, 0, bytemuck::cast_slice(&buf.colors));
        self.queue
            .write_buffer(&self.size_buffer, 0, bytemuck::cast_slice(&buf.sizes));
        field.buffer_mut().mark_uploaded();
    }
}

impl Renderer for GpuState {
    fn resize(&mut self, viewport: &Viewport) {
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));

        let (width, height) = viewport.physical_size();
        if width != self.config.width || height != self.config.height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn draw(
        &mut self,
        camera: &PerspectiveCamera,
        field: &mut ParticleField,
    ) -> Result<(), ParticleError> {
        if field.buffer().is_dirty() {
            self.upload(field);
        }

        let [r, g, b] = field.base_color();
        let uniforms = ParticleUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            color: [r, g, b, 1.0],
            viewport: [self.config.width as f32, self.config.height as f32],
            point_scale: POINT_SCALE,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[gpu] surface timeout; skipping frame");
                return Ok(());
            }
            Err(e) => return Err(ParticleError::Render(format!("{:?}", e))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let count = field.buffer().len() as u32;
            if count > 0 {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.position_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.color_buffer.slice(..));
                rpass.set_vertex_buffer(2, self.size_buffer.slice(..));
                // six vertices expand into one sprite quad per instance
                rpass.draw(0..6, 0..count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
