use super::helpers;
use parts_core::ViewerConfig;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CompositeUniforms {
    background: [f32; 4],
    exposure: f32,
    _pad: [f32; 3],
}

impl CompositeUniforms {
    fn for_viewer(viewer: &ViewerConfig) -> Self {
        // Page colours are sRGB; the swapchain format re-encodes on write.
        let [r, g, b] = parts_core::hex_to_rgb(viewer.background).map(|c| c.powf(2.2));
        Self {
            background: [r, g, b, 1.0],
            exposure: viewer.exposure,
            _pad: [0.0; 3],
        }
    }
}

/// Tone-maps the HDR scene over the viewer background into the swapchain.
pub(crate) struct CompositePass {
    layout: wgpu::BindGroupLayout,
    uniforms: wgpu::Buffer,
    sampler: wgpu::Sampler,
    pipeline: wgpu::RenderPipeline,
}

impl CompositePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        shader: &wgpu::ShaderModule,
        swap_format: wgpu::TextureFormat,
        viewer: &ViewerConfig,
    ) -> Self {
        let fragment = wgpu::ShaderStages::FRAGMENT;
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("composite_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: fragment,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: fragment,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                helpers::uniform_entry(2, fragment, false),
            ],
        });

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("composite_uniforms"),
            size: std::mem::size_of::<CompositeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let values = CompositeUniforms::for_viewer(viewer);
        queue.write_buffer(&uniforms, 0, bytemuck::bytes_of(&values));

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("composite_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline = helpers::build_pipeline(
            device,
            &[&layout],
            shader,
            helpers::PipelineSpec {
                label: "composite_pipeline",
                vs_entry: "vs_fullscreen",
                fs_entry: "fs_composite",
                vertex_buffers: &[],
                color_format: swap_format,
                depth: false,
            },
        );

        Self {
            layout,
            uniforms,
            sampler,
            pipeline,
        }
    }

    /// Bind group sampling `hdr_view`; rebuilt whenever the targets change.
    pub(crate) fn bind(&self, device: &wgpu::Device, hdr_view: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("composite_bg"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(hdr_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniforms.as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        scene: &wgpu::BindGroup,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("composite"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    // Every pixel is overwritten by the fullscreen triangle.
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene, &[]);
        pass.draw(0..3, 0..1);
    }
}
