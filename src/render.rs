use parts_core::viewer::SceneView;
use parts_core::ViewerConfig;
use web_sys as web;

mod helpers;
mod meshes;
mod post;
mod targets;
use meshes::{FrameUniforms, MeshPass};
use post::CompositePass;
use targets::RenderTargets;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // Scene pass
    meshes: MeshPass,
    // Composite over the page background
    targets: RenderTargets,
    composite: CompositePass,
    scene_bg: wgpu::BindGroup,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        viewer: &ViewerConfig,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let (adapter, device, queue) = open_device(&instance, &surface).await?;
        let config = surface_config(&surface.get_capabilities(&adapter), width, height)?;
        let format = config.format;
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);

        let meshes = MeshPass::new(&device, &wgsl(&device, "mesh_shader", parts_core::MESH_WGSL));
        let post_shader = wgsl(&device, "post_shader", parts_core::POST_WGSL);
        let composite = CompositePass::new(&device, &queue, &post_shader, format, viewer);
        let scene_bg = composite.bind(&device, &targets.hdr_view);

        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            meshes,
            targets,
            composite,
            scene_bg,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns true when the surface was reconfigured.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        // Recreate offscreen render targets and the bind group sampling them
        self.targets = RenderTargets::new(&self.device, width, height);
        self.scene_bg = self.composite.bind(&self.device, &self.targets.hdr_view);
        true
    }

    pub fn render(&mut self, view: &impl SceneView) -> Result<(), wgpu::SurfaceError> {
        let items = view.draw_items();
        let frame_uniforms = FrameUniforms::from_view(view);
        self.meshes
            .prepare(&self.device, &self.queue, &frame_uniforms, &items);

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: lit meshes into HDR; alpha stays 0 where nothing is drawn
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.meshes.draw(&mut rpass, &items);
        }

        // Pass 2: tone map over the page background into the swapchain
        self.composite.draw(&mut encoder, &target, &self.scene_bg);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn wgsl(device: &wgpu::Device, label: &str, source: &'static str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

async fn open_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
) -> anyhow::Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let options = wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(surface),
        force_fallback_adapter: false,
    };
    let Some(adapter) = instance.request_adapter(&options).await else {
        anyhow::bail!("no WebGPU adapter");
    };
    let info = adapter.get_info();
    log::info!("[gpu] adapter {} ({:?})", info.name, info.backend);

    // Default limits: some browsers reject descriptors naming newer limits.
    let descriptor = wgpu::DeviceDescriptor {
        label: Some("parts_device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default(),
        memory_hints: wgpu::MemoryHints::Performance,
    };
    let (device, queue) = adapter
        .request_device(&descriptor, None)
        .await
        .map_err(|e| anyhow::anyhow!("request_device: {:?}", e))?;
    Ok((adapter, device, queue))
}

/// Prefer an sRGB swapchain so the composite's linear output is encoded.
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> anyhow::Result<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode,
        view_formats: Vec::new(),
        desired_maximum_frame_latency: 2,
    })
}
