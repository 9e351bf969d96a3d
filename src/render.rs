use crate::core::{Palette, SceneFrame, SceneRenderer, SceneVertex, SphereError};
use glam::Mat4;
use web_sys as web;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl SceneUniforms {
    fn new(view_proj: Mat4, model: Mat4, ink: [f32; 3], alpha: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: [ink[0], ink[1], ink[2], alpha],
        }
    }
}

/// One draw: a pipeline, its vertex buffer and the uniforms it reads.
struct Layer {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    capacity: usize,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Layer {
    #[allow(clippy::too_many_arguments)]
    fn new(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::PipelineLayout,
        bgl: &wgpu::BindGroupLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        topology: wgpu::PrimitiveTopology,
        capacity: usize,
    ) -> Self {
        let pipeline = helpers::make_scene_pipeline(device, layout, shader, format, topology);
        let vertices = helpers::create_vertex_buffer(device, label, capacity);
        let uniforms =
            helpers::create_uniform_buffer(device, label, std::mem::size_of::<SceneUniforms>());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        Self {
            pipeline,
            vertices,
            capacity,
            uniforms,
            bind_group,
        }
    }

    fn upload(&self, queue: &wgpu::Queue, vertices: &[SceneVertex], uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(uniforms));
        let n = vertices.len().min(self.capacity);
        if n > 0 {
            queue.write_buffer(&self.vertices, 0, bytemuck::cast_slice(&vertices[..n]));
        }
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, count: usize) {
        let n = count.min(self.capacity) as u32;
        if n == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.draw(0..n, 0..1);
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particles: Layer,
    facets: Layer,
    edges: Layer,
    particles_uploaded: bool,
}

impl GpuState {
    /// `facet_count` sizes the fill and edge buffers; they are never reallocated.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        facet_count: usize,
        particle_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| SphereError::RenderingUnavailable("no graphics adapter".into()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 fallback cannot satisfy the WebGPU defaults
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| SphereError::RenderingUnavailable(format!("request_device: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // Palette colors are authored for direct output, so skip sRGB encoding when possible.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SphereError::RenderingUnavailable("no surface format".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let particles = Layer::new(
            &device,
            "particles",
            &layout,
            &bgl,
            &shader,
            format,
            wgpu::PrimitiveTopology::PointList,
            particle_count,
        );
        let facets = Layer::new(
            &device,
            "facets",
            &layout,
            &bgl,
            &shader,
            format,
            wgpu::PrimitiveTopology::TriangleList,
            facet_count * 3,
        );
        let edges = Layer::new(
            &device,
            "edges",
            &layout,
            &bgl,
            &shader,
            format,
            wgpu::PrimitiveTopology::LineList,
            facet_count * 6,
        );

        log::info!(
            "[gpu] {:?} {}x{} format={:?}",
            adapter.get_info().backend,
            width,
            height,
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particles,
            facets,
            edges,
            particles_uploaded: false,
        })
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, frame: &SceneFrame<'_>) -> Result<(), wgpu::SurfaceError> {
        let ink = frame.palette.ink;
        let identity = Mat4::IDENTITY;

        // Particles never move, so their vertices go up once.
        let particle_vertices: &[SceneVertex] = if self.particles_uploaded {
            &[]
        } else {
            frame.particles
        };
        self.particles.upload(
            &self.queue,
            particle_vertices,
            &SceneUniforms::new(frame.view_proj, identity, ink, frame.palette.particle_opacity),
        );
        self.particles_uploaded = true;
        self.facets.upload(
            &self.queue,
            frame.fill,
            &SceneUniforms::new(frame.view_proj, frame.model, ink, 1.0),
        );
        self.edges.upload(
            &self.queue,
            frame.edges,
            &SceneUniforms::new(frame.view_proj, frame.model, ink, 1.0),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(frame.palette)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.particles.draw(&mut rpass, frame.particles.len());
            self.facets.draw(&mut rpass, frame.fill.len());
            self.edges.draw(&mut rpass, frame.edges.len());
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[inline]
fn clear_color(palette: &Palette) -> wgpu::Color {
    let [r, g, b] = palette.background;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

impl SceneRenderer for GpuState {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    fn render(&mut self, frame: &SceneFrame<'_>) {
        match self.draw(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::debug!("[gpu] frame timeout"),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}
