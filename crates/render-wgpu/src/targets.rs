/// Backface normals want sign and some precision, so the capture is f16.
pub const BACKFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The offscreen captures plus the depth buffers the diamond passes need.
///
/// Recreated wholesale whenever the surface resolution changes; consumers
/// holding views into the old targets (the refraction bind group) must be
/// rebuilt at the same time so stale textures are never sampled.
pub struct RenderTargets {
    pub env_view: wgpu::TextureView,
    pub backface_view: wgpu::TextureView,
    pub backface_depth_view: wgpu::TextureView,
    pub screen_depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl RenderTargets {
    pub fn new(
        device: &wgpu::Device,
        env_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let env_view = color_target(device, "env_target", env_format, width, height);
        let backface_view = color_target(device, "backface_target", BACKFACE_FORMAT, width, height);
        let backface_depth_view = depth_target(device, "backface_depth", width, height);
        let screen_depth_view = depth_target(device, "screen_depth", width, height);

        tracing::debug!(width, height, "render targets created");

        Self {
            env_view,
            backface_view,
            backface_depth_view,
            screen_depth_view,
            width,
            height,
        }
    }

    /// Current pixel dimensions; always equal to the surface resolution.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn color_target(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

fn depth_target(device: &wgpu::Device, label: &str, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
