use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{data_structures::texture, settings::Settings};

/// The GPU and window state shared by every lesson.
///
/// Owns the surface, device and queue plus the depth buffer that the render
/// loop attaches to its single render pass. Lessons may change `clear_colour`
/// during `on_init` or through [`crate::flow::Out::Configure`].
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub clear_colour: wgpu::Color,
    pub(crate) is_surface_configured: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>, settings: &Settings) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::debug!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No compatible GPU adapter found")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Lesson Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .context("Failed to create the GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours in the lesson shaders are written in linear space, so prefer
        // an sRGB surface that does the conversion on store.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("The surface reports no supported formats")?;
        let present_mode = choose_present_mode(settings.vsync, &surface_caps.present_modes);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            clear_colour: settings.clear_colour,
            is_surface_configured: false,
        })
    }

    /// Match the surface and depth buffer to a new framebuffer size.
    ///
    /// A zero-sized framebuffer (minimized window) leaves everything as it is.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = texture::Texture::create_depth_texture(
            &self.device,
            [self.config.width, self.config.height],
            "depth_texture",
        );
        self.is_surface_configured = true;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn compute_limits(&self) -> ComputeLimits {
        ComputeLimits::from(&self.device.limits())
    }
}

pub fn choose_present_mode(
    vsync: bool,
    available: &[wgpu::PresentMode],
) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|mode| available.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

/// Compute dispatch limits of the active device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputeLimits {
    /// Maximum number of workgroups per dispatch dimension.
    pub max_workgroup_count: [u32; 3],
    /// Maximum size of a single workgroup per dimension.
    pub max_workgroup_size: [u32; 3],
    pub max_invocations_per_workgroup: u32,
}

impl ComputeLimits {
    pub fn log(&self) {
        log::info!("GPU compute limitations:");
        for (axis, count) in ["X", "Y", "Z"].iter().zip(self.max_workgroup_count) {
            log::info!("maximum number of work groups in {axis} dimension {count}");
        }
        for (axis, size) in ["X", "Y", "Z"].iter().zip(self.max_workgroup_size) {
            log::info!("maximum size of a work group in {axis} dimension {size}");
        }
        log::info!(
            "Number of invocations in a single local work group that may be dispatched to a compute shader {}",
            self.max_invocations_per_workgroup
        );
    }

    /// Whether a dispatch of `workgroups` groups of `workgroup_size` fits the device.
    pub fn allows(&self, workgroups: [u32; 3], workgroup_size: [u32; 3]) -> bool {
        let invocations = workgroup_size.iter().map(|&s| u64::from(s)).product::<u64>();
        workgroups
            .iter()
            .zip(self.max_workgroup_count)
            .all(|(&n, max)| n <= max)
            && workgroup_size
                .iter()
                .zip(self.max_workgroup_size)
                .all(|(&n, max)| n <= max)
            && invocations <= u64::from(self.max_invocations_per_workgroup)
    }
}

impl From<&wgpu::Limits> for ComputeLimits {
    fn from(limits: &wgpu::Limits) -> Self {
        let per_dimension = limits.max_compute_workgroups_per_dimension;
        Self {
            max_workgroup_count: [per_dimension; 3],
            max_workgroup_size: [
                limits.max_compute_workgroup_size_x,
                limits.max_compute_workgroup_size_y,
                limits.max_compute_workgroup_size_z,
            ],
            max_invocations_per_workgroup: limits.max_compute_invocations_per_workgroup,
        }
    }
}

/// What a lesson constructor gets to build its GPU resources with.
///
/// `wgpu::Device` and `wgpu::Queue` are reference counted internally, so the
/// clones in `From<&Context>` only copy handles.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            format: ctx.config.format,
            width: ctx.config.width,
            height: ctx.config.height,
        }
    }
}
