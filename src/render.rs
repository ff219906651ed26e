use crate::constants::MAX_POINT_PX;
use crate::dom;
use starfield_core::constants::CLEAR_COLOR;
use starfield_core::{RenderSurface, SceneFrame, StarLayer};
use web_sys as web;

mod layers;
use layers::{create_star_pipeline, LayerGpu, LayerUniforms};

pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    layer_bgl: wgpu::BindGroupLayout,
    layers: Vec<LayerGpu>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The canvas is transparent where nothing is drawn.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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

        let (pipeline, layer_bgl) = create_star_pipeline(&device, format);
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            pipeline,
            layer_bgl,
            layers: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0] as f64,
                g: CLEAR_COLOR[1] as f64,
                b: CLEAR_COLOR[2] as f64,
                a: 1.0,
            },
        })
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }
}

impl RenderSurface for GpuState {
    type Error = wgpu::SurfaceError;

    fn load_field(&mut self, layers: &[StarLayer]) {
        self.layers = layers
            .iter()
            .enumerate()
            .map(|(i, layer)| LayerGpu::new(&self.device, &self.layer_bgl, i, layer))
            .collect();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        dom::sync_canvas_backing_size(&self.canvas, width, height);
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), wgpu::SurfaceError> {
        let viewport = [self.width as f32, self.height as f32];
        let proj_scale = self.height as f32 * 0.5;
        for (gpu, lf) in self.layers.iter().zip(&frame.layers) {
            let u = LayerUniforms {
                mvp: (frame.view_proj * lf.model).to_cols_array_2d(),
                viewport,
                point_scale: lf.point_scale,
                opacity: lf.opacity,
                proj_scale,
                near: frame.camera.znear,
                max_px: MAX_POINT_PX,
                _pad: 0.0,
            };
            self.queue
                .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
            if lf.sizes_dirty {
                self.queue
                    .write_buffer(&gpu.size_buffer, 0, bytemuck::cast_slice(lf.sizes));
            }
        }

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.reconfigure();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
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
                label: Some("stars_pass"),
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
            rpass.set_pipeline(&self.pipeline);
            for gpu in &self.layers {
                if gpu.count == 0 {
                    continue;
                }
                rpass.set_bind_group(0, &gpu.bind_group, &[]);
                rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, gpu.size_buffer.slice(..));
                rpass.draw(0..6, 0..gpu.count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
