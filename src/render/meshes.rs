use super::helpers;
use fnv::FnvHashMap;
use glam::Mat4;
use parts_core::viewer::SceneView;
use parts_core::{DrawItem, MeshData};
use std::rc::{Rc, Weak};
use wgpu::util::DeviceExt;

pub(crate) const MAX_LIGHTS: usize = 4;
const DRAW_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    lights: [[f32; 4]; MAX_LIGHTS],
}

impl FrameUniforms {
    pub(crate) fn from_view(view: &impl SceneView) -> Self {
        let cfg = view.config();
        let cam = view.camera();
        let mut lights = [[0.0; 4]; MAX_LIGHTS];
        for (slot, l) in lights.iter_mut().zip(cfg.lights) {
            *slot = l.direction.extend(l.intensity).to_array();
        }
        Self {
            view_proj: cam.view_proj().to_cols_array_2d(),
            eye: cam.eye.extend(1.0).to_array(),
            ambient: [cfg.ambient, cfg.lights.len().min(MAX_LIGHTS) as f32, 0.0, 0.0],
            lights,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    normal_mat: [[f32; 4]; 4],
    base_color: [f32; 4],
    params: [f32; 4],
}

impl DrawUniforms {
    fn new(item: &DrawItem) -> Self {
        let m = &item.material;
        let [r, g, b] = m.rgb();
        Self {
            model: item.model.to_cols_array_2d(),
            normal_mat: normal_matrix(&item.model).to_cols_array_2d(),
            base_color: [r, g, b, 1.0],
            params: [m.metalness, m.roughness, m.env_map_intensity.unwrap_or(1.0), 0.0],
        }
    }
}

#[inline]
fn normal_matrix(model: &Mat4) -> Mat4 {
    if model.determinant().abs() < f32::EPSILON {
        return Mat4::IDENTITY;
    }
    model.inverse().transpose()
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, data: &MeshData) -> Self {
        let vertices: Vec<[f32; 6]> = data
            .positions
            .iter()
            .zip(&data.normals)
            .map(|(p, n)| [p[0], p[1], p[2], n[0], n[1], n[2]])
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

/// GPU buffers per shared geometry, keyed by the `Rc` allocation.
#[derive(Default)]
pub(crate) struct MeshCache {
    entries: FnvHashMap<usize, (Weak<MeshData>, GpuMesh)>,
}

impl MeshCache {
    fn ensure(&mut self, device: &wgpu::Device, geometry: &Rc<MeshData>) {
        let key = Rc::as_ptr(geometry) as usize;
        self.entries
            .entry(key)
            .or_insert_with(|| (Rc::downgrade(geometry), GpuMesh::upload(device, geometry)));
    }

    fn get(&self, geometry: &Rc<MeshData>) -> Option<&GpuMesh> {
        self.entries
            .get(&(Rc::as_ptr(geometry) as usize))
            .map(|(_, mesh)| mesh)
    }

    /// Drop buffers whose geometry is gone (e.g. after a scene rebuild).
    fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, (weak, _)| weak.strong_count() > 0);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            log::info!("[gpu] released {} mesh buffers", dropped);
        }
    }
}

/// Lit mesh pass state: pipeline, frame uniforms and per-draw uniforms.
pub(crate) struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bg: wgpu::BindGroup,
    draw_capacity: u64,
    cache: MeshCache,
}

impl MeshPass {
    pub(crate) fn new(device: &wgpu::Device, shader: &wgpu::ShaderModule) -> Self {
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_frame_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, false)],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_draw_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, true)],
        });
        let pipeline = helpers::build_pipeline(
            device,
            &[&frame_bgl, &draw_bgl],
            shader,
            helpers::PipelineSpec {
                label: "mesh_pipeline",
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                vertex_buffers: &[helpers::mesh_vertex_layout()],
                color_format: helpers::HDR_FORMAT,
                depth: true,
            },
        );
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let draw_capacity = 64;
        let (draw_buffer, draw_bg) = create_draw_buffer(device, &draw_bgl, draw_capacity);
        Self {
            pipeline,
            frame_buffer,
            frame_bg,
            draw_bgl,
            draw_buffer,
            draw_bg,
            draw_capacity,
            cache: MeshCache::default(),
        }
    }

    /// Upload geometry and uniforms for `items`; must precede [`Self::draw`].
    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &FrameUniforms,
        items: &[DrawItem],
    ) {
        self.cache.prune();
        for item in items {
            self.cache.ensure(device, &item.geometry);
        }
        let needed = items.len().max(1) as u64;
        if needed > self.draw_capacity {
            self.draw_capacity = needed.next_power_of_two();
            (self.draw_buffer, self.draw_bg) =
                create_draw_buffer(device, &self.draw_bgl, self.draw_capacity);
            log::info!("[gpu] draw uniforms grown to {}", self.draw_capacity);
        }
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(frame));
        let mut staging = vec![0u8; (DRAW_STRIDE * items.len() as u64) as usize];
        for (i, item) in items.iter().enumerate() {
            let u = DrawUniforms::new(item);
            let start = i * DRAW_STRIDE as usize;
            let bytes = bytemuck::bytes_of(&u);
            staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        if !staging.is_empty() {
            queue.write_buffer(&self.draw_buffer, 0, &staging);
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, items: &[DrawItem]) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.frame_bg, &[]);
        for (i, item) in items.iter().enumerate() {
            let Some(mesh) = self.cache.get(&item.geometry) else {
                continue;
            };
            let offset = (i as u64 * DRAW_STRIDE) as u32;
            rpass.set_bind_group(1, &self.draw_bg, &[offset]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

fn create_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("mesh_draw_uniforms"),
        size: DRAW_STRIDE * capacity,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("mesh_draw_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64),
            }),
        }],
    });
    (buffer, bg)
}
