//! Window bootstrap and the render loop.
//!
//! Every lesson needs the same scaffolding: open a window, create the GPU
//! context, poll input, clear, draw, present, and tear down when the window
//! closes. This module does that once. A lesson only implements [`Lesson`].
//!
//! # User-facing types
//!
//! - [`Lesson`] is the trait for a demo that builds GPU resources and draws
//! - [`Out`] lets lifecycle hooks reconfigure the context or end the loop
//! - [`run`] starts the event loop with one or more lessons
//!
//! # Lifecycle
//!
//! The event loop follows this pattern each frame:
//! 1. Collect window/device events and hand them to every lesson
//! 2. Tick the frame timer and call `on_update`
//! 3. Record every lesson's compute work via `on_compute`
//! 4. Begin one render pass that clears colour and depth
//! 5. Replay every lesson's `on_render()` into the pass
//! 6. Submit and present
//!
//! Escape or closing the window ends the loop. Resizing the window resizes
//! the surface and depth buffer to match.

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use anyhow::anyhow;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    context::{Context, InitContext},
    render::Render,
    settings::Settings,
    time::{FrameTime, FrameTimer},
};

/// Output of a lifecycle hook.
///
/// `Out::Configure` modifies the Context at runtime, for instance to change
/// the clear colour.
///
/// `Out::Exit` closes the window and ends the render loop.
///
/// `Empty` is the default output used when nothing needs to happen.
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Exit,
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

impl Debug for Out {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configure(_) => f.write_str("Configure(|&mut Context| {...})"),
            Self::Exit => f.write_str("Exit"),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

#[cfg(feature = "integration-tests")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTestResult {
    Passed,
    Waiting,
    Failed,
}

/// The pixels of a frame read back from the GPU.
#[cfg(feature = "integration-tests")]
pub type FrameImage = image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>;

/// A self-contained demo.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once after construction; configure the context here
/// 2. `on_window_events()` and `on_device_events()` are called for each winit input event
/// 3. `on_update()` is called every frame before anything is recorded
/// 4. `on_compute()` records compute passes that run before the frame's render pass
/// 5. `on_render()` is called each frame and specifies what to draw
///
pub trait Lesson {
    /// The only place with mutable access to the Context, e.g. to set the clear colour.
    fn on_init(&mut self, _ctx: &mut Context) -> Out {
        Out::Empty
    }

    /// Handle window events (keyboard, mouse buttons, scrolling, resizing).
    fn on_window_events(&mut self, _ctx: &Context, _event: &WindowEvent) -> Out {
        Out::Empty
    }

    /// Handle raw device events such as relative mouse motion.
    fn on_device_events(&mut self, _ctx: &Context, _event: &DeviceEvent) -> Out {
        Out::Empty
    }

    /// Update state every frame and upload per-frame data.
    fn on_update(&mut self, _ctx: &Context, _time: &FrameTime) -> Out {
        Out::Empty
    }

    /// Record compute work. Everything recorded here is finished before the
    /// render pass of the same frame reads from it.
    fn on_compute(&self, _ctx: &Context, _encoder: &mut wgpu::CommandEncoder) {}

    /// Return the draw calls for this frame.
    fn on_render<'pass>(&self) -> Render<'_, 'pass>;

    /// Inspect the rendered frame. The loop exits once every lesson passed.
    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        _ctx: &Context,
        _frame: u64,
        _texture: &FrameImage,
    ) -> anyhow::Result<ImageTestResult> {
        Ok(ImageTestResult::Passed)
    }
}

/// Type alias for a lesson constructor (factory function).
///
/// A constructor takes an `InitContext` and asynchronously returns a boxed
/// `Lesson`. Shaders, buffers and textures are created here.
pub type LessonConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn Lesson>>>>>>;

/// Box a lesson's async constructor into a [`LessonConstructor`].
pub fn constructor<L, F, Fut>(f: F) -> LessonConstructor
where
    L: Lesson + 'static,
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<L>> + 'static,
{
    Box::new(move |ctx| {
        Box::pin(async move {
            let lesson = f(ctx).await?;
            Ok(Box::new(lesson) as Box<dyn Lesson>)
        })
    })
}

/// GPU context plus the frame clock of the running loop.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) ctx: Context,
    timer: FrameTimer,
}

impl AppState {
    async fn new(window: Arc<Window>, settings: &Settings) -> anyhow::Result<Self> {
        let ctx = Context::new(window, settings).await?;
        Ok(Self {
            ctx,
            timer: FrameTimer::new(settings.fps_log_interval),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    fn render(
        &mut self,
        lessons: &[Box<dyn Lesson>],
        #[cfg(feature = "integration-tests")] async_runtime: &tokio::runtime::Runtime,
        #[cfg(feature = "integration-tests")] frame: u64,
    ) -> Result<bool, wgpu::SurfaceError> {
        // keep the loop running
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.ctx.is_surface_configured {
            return Ok(false);
        }

        #[cfg(not(feature = "integration-tests"))]
        let output = self.ctx.surface.get_current_texture()?;
        #[cfg(not(feature = "integration-tests"))]
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        #[cfg(feature = "integration-tests")]
        let (tex, depth) = {
            let extent3d = test_extent(&self.ctx);
            (
                test_texture(&self.ctx, extent3d),
                crate::data_structures::texture::Texture::create_depth_texture(
                    &self.ctx.device,
                    [extent3d.width, extent3d.height],
                    "Golden Image Test Depth Texture",
                ),
            )
        };
        #[cfg(feature = "integration-tests")]
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        for lesson in lessons.iter() {
            lesson.on_compute(&self.ctx, &mut encoder);
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    #[cfg(feature = "integration-tests")]
                    view: &depth.view,
                    #[cfg(not(feature = "integration-tests"))]
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for lesson in lessons.iter() {
                let render: Render<'_, '_> = lesson.on_render();
                render.record(&self.ctx, &mut render_pass);
            }
        }

        #[cfg(feature = "integration-tests")]
        let output_buffer = copy_to_buffer(&self.ctx, &mut encoder, &tex);

        self.ctx.queue.submit(iter::once(encoder.finish()));

        #[cfg(feature = "integration-tests")]
        {
            let img = async_runtime.block_on(read_back(&self.ctx, &output_buffer));
            let all_passed = lessons
                .iter()
                .map(|lesson| lesson.render_to_texture(&self.ctx, frame, &img))
                .map(|res| match res {
                    Err(e) => panic!("{}", e),
                    Ok(ImageTestResult::Passed) => true,
                    Ok(ImageTestResult::Failed) => panic!("Assertion failed"),
                    Ok(ImageTestResult::Waiting) => false,
                })
                .fold(true, |all, passed| all && passed);
            return Ok(all_passed);
        }

        #[cfg(not(feature = "integration-tests"))]
        {
            output.present();
            Ok(false)
        }
    }
}

// The readback buffer needs rows padded to COPY_BYTES_PER_ROW_ALIGNMENT.
#[cfg(feature = "integration-tests")]
fn test_extent(ctx: &Context) -> wgpu::Extent3d {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT / 4;
    let width = ctx.config.width.div_ceil(align) * align;
    wgpu::Extent3d {
        width,
        height: ctx.config.height,
        depth_or_array_layers: 1,
    }
}

#[cfg(feature = "integration-tests")]
fn test_texture(ctx: &Context, extent3d: wgpu::Extent3d) -> wgpu::Texture {
    ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Golden Image Test Output Texture"),
        size: extent3d,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ctx.config.format,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

#[cfg(feature = "integration-tests")]
fn copy_to_buffer(
    ctx: &Context,
    encoder: &mut wgpu::CommandEncoder,
    tex: &wgpu::Texture,
) -> wgpu::Buffer {
    let u32_size = std::mem::size_of::<u32>() as u32;
    let extent3d = test_extent(ctx);
    let output_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        size: (u32_size * extent3d.width * extent3d.height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        label: Some("Golden Image Test Readback"),
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(u32_size * extent3d.width),
                rows_per_image: Some(extent3d.height),
            },
        },
        extent3d,
    );
    output_buffer
}

#[cfg(feature = "integration-tests")]
async fn read_back(
    ctx: &Context,
    output_buffer: &wgpu::Buffer,
) -> FrameImage {
    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).unwrap();
    });
    ctx.device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(std::time::Duration::from_secs(3)),
        })
        .unwrap();
    rx.receive().await.unwrap().unwrap();
    let data = buffer_slice.get_mapped_range();
    let extent3d = test_extent(ctx);
    image::ImageBuffer::<image::Rgba<u8>, _>::from_raw(extent3d.width, extent3d.height, data)
        .unwrap()
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    settings: Settings,
    state: Option<AppState>,
    // This will hold the fully initialized lessons once they are ready.
    lessons: Vec<Box<dyn Lesson>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<LessonConstructor>>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, constructors: Vec<LessonConstructor>) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            settings,
            state: None,
            lessons: Vec::new(),
            constructors: Some(constructors),
            error: None,
        })
    }

    fn init(
        &mut self,
        event_loop: &ActiveEventLoop,
        constructors: Vec<LessonConstructor>,
    ) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let settings = &self.settings;
        let init_future = async move {
            let app_state = AppState::new(window, settings).await?;
            let lesson_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() only copies the device and queue handles
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let lessons = futures::future::join_all(lesson_futures)
                .await
                .into_iter()
                .collect::<anyhow::Result<Vec<_>>>()?;
            anyhow::Ok((app_state, lessons))
        };
        let (mut app_state, lessons) = self.async_runtime.block_on(init_future)?;

        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);

        self.lessons = lessons;
        for lesson in self.lessons.iter_mut() {
            let out = lesson.on_init(&mut app_state.ctx);
            handle_lesson_output(&mut app_state.ctx, event_loop, out);
        }
        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            // Already running, e.g. resumed after a suspend
            return;
        };
        if let Err(e) = self.init(event_loop, constructors) {
            self.fail(event_loop, e.context("Lesson initialization failed"));
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        for lesson in self.lessons.iter_mut() {
            let out = lesson.on_device_events(&state.ctx, &event);
            handle_lesson_output(&mut state.ctx, event_loop, out);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        for lesson in self.lessons.iter_mut() {
            let out = lesson.on_window_events(&state.ctx, &event);
            handle_lesson_output(&mut state.ctx, event_loop, out);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let time = state.timer.tick();
                for lesson in self.lessons.iter_mut() {
                    let out = lesson.on_update(&state.ctx, &time);
                    handle_lesson_output(&mut state.ctx, event_loop, out);
                }

                match state.render(
                    &self.lessons,
                    #[cfg(feature = "integration-tests")]
                    &self.async_runtime,
                    #[cfg(feature = "integration-tests")]
                    time.frame_index,
                ) {
                    Ok(true) => event_loop.exit(),
                    Ok(false) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, anyhow!("The GPU ran out of memory"));
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_lesson_output(ctx: &mut Context, event_loop: &ActiveEventLoop, out: Out) {
    match out {
        Out::Configure(f) => f(ctx),
        Out::Exit => event_loop.exit(),
        Out::Empty => (),
    }
}

fn init_logging(settings: &Settings) {
    let mut builder = env_logger::Builder::new();
    let filter = settings
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok());
    match filter {
        Some(filter) => {
            builder.parse_filters(&filter);
        }
        None => {
            builder
                .filter_level(log::LevelFilter::Info)
                .filter_module("wgpu_core", log::LevelFilter::Warn)
                .filter_module("wgpu_hal", log::LevelFilter::Warn)
                .filter_module("naga", log::LevelFilter::Warn);
        }
    }
    if let Err(e) = builder.try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }
}

/// Open a window and run `constructors`' lessons until the window closes.
pub fn run(settings: Settings, constructors: Vec<LessonConstructor>) -> anyhow::Result<()> {
    init_logging(&settings);

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        EventLoop::builder().with_any_thread(true).build()?
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        EventLoop::builder().with_any_thread(true).build()?
    };

    #[cfg(not(all(
        feature = "integration-tests",
        any(target_os = "linux", target_os = "windows")
    )))]
    let event_loop: EventLoop<()> = EventLoop::new()?;

    let mut app = App::new(settings, constructors)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
