use super::helpers::{texture_2d, DEPTH_FORMAT, HDR_FORMAT};

/// Offscreen targets for the scene pass, sized to the surface.
///
/// The HDR target's alpha marks covered pixels so the composite can keep the
/// page background where no part was drawn.
pub(crate) struct RenderTargets {
    _hdr: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    _depth: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = (width, height);
        let (_hdr, hdr_view) = texture_2d(
            device,
            "scene_hdr",
            size,
            HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (_depth, depth_view) = texture_2d(
            device,
            "scene_depth",
            size,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            _hdr,
            hdr_view,
            _depth,
            depth_view,
        }
    }
}
