#![cfg(feature = "integration-tests")]

use wgpu_lessons::{
    DeviceEvent, WindowEvent,
    context::{Context, InitContext},
    flow::{self, FrameImage, ImageTestResult, Lesson, Out},
    render::Render,
    settings::Settings,
    time::FrameTime,
};

pub(crate) type Validate =
    Box<dyn Fn(&Context, u64, &FrameImage) -> Result<ImageTestResult, anyhow::Error>>;

/// Runs a lesson unchanged and checks every frame it renders.
pub(crate) struct Golden<L> {
    lesson: L,
    validate: Validate,
}

impl<L: Lesson> Lesson for Golden<L> {
    fn on_init(&mut self, ctx: &mut Context) -> Out {
        self.lesson.on_init(ctx)
    }

    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) -> Out {
        self.lesson.on_window_events(ctx, event)
    }

    fn on_device_events(&mut self, ctx: &Context, event: &DeviceEvent) -> Out {
        self.lesson.on_device_events(ctx, event)
    }

    fn on_update(&mut self, ctx: &Context, time: &FrameTime) -> Out {
        self.lesson.on_update(ctx, time)
    }

    fn on_compute(&self, ctx: &Context, encoder: &mut wgpu::CommandEncoder) {
        self.lesson.on_compute(ctx, encoder)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.lesson.on_render()
    }

    fn render_to_texture(
        &self,
        ctx: &Context,
        frame: u64,
        texture: &FrameImage,
    ) -> Result<ImageTestResult, anyhow::Error> {
        (self.validate)(ctx, frame, texture)
    }
}

/// Open a window, build the lesson with `new` and run it until `validate`
/// passes on a rendered frame.
pub(crate) fn golden_image_test<L, F, Fut>(settings: Settings, new: F, validate: Validate)
where
    L: Lesson + 'static,
    F: FnOnce(InitContext) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<L>> + 'static,
{
    let constructor = flow::constructor(move |ctx| async move {
        let lesson = new(ctx).await?;
        Ok(Golden { lesson, validate })
    });
    wgpu_lessons::run(settings, vec![constructor])
        .expect("Failed to run lesson for integration test.");
}

fn srgb_encode(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// The bytes `colour` ends up as in the surface format.
pub(crate) fn expected_pixel(ctx: &Context, colour: wgpu::Color) -> [u8; 4] {
    let srgb = ctx.config.format.is_srgb();
    let to_u8 = |v: f64, encode: bool| {
        let v = v.clamp(0.0, 1.0);
        let v = if encode { srgb_encode(v) } else { v };
        (v * 255.0).round() as u8
    };
    [
        to_u8(colour.r, srgb),
        to_u8(colour.g, srgb),
        to_u8(colour.b, srgb),
        to_u8(colour.a, false),
    ]
}

/// A read back pixel in RGBA order, whatever the surface's channel order.
pub(crate) fn rgba(ctx: &Context, pixel: &image::Rgba<u8>) -> [u8; 4] {
    let [c0, c1, c2, c3] = pixel.0;
    match ctx.config.format {
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => [c2, c1, c0, c3],
        _ => [c0, c1, c2, c3],
    }
}

pub(crate) fn close_to(actual: [u8; 4], expected: [u8; 4]) -> bool {
    actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= 2)
}

/// Number of pixels that differ from the clear colour.
pub(crate) fn drawn_pixels(ctx: &Context, texture: &FrameImage) -> usize {
    let clear = expected_pixel(ctx, ctx.clear_colour);
    texture
        .pixels()
        .filter(|pixel| !close_to(rgba(ctx, pixel), clear))
        .count()
}

/// A device without a window, for tests that only compile programs.
pub(crate) async fn headless_device() -> wgpu::Device {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("No GPU adapter for integration test.");
    let (device, _queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default())
        .await
        .expect("Failed to create device for integration test.");
    device
}
