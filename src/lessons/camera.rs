//! Ten textured cubes seen through a fly camera.
//!
//! WASD or the arrow keys move, dragging with the right mouse button looks
//! around and the scroll wheel zooms. The cubes share one vertex buffer and
//! get their model matrices from a per-instance buffer.

use wgpu::util::DeviceExt;
use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    camera::{Camera, CameraController, CameraUniform, PITCH, Projection, YAW},
    context::{Context, InitContext},
    data_structures::{
        instance::{CUBE_POSITIONS, ModelRaw, cube_model},
        uniform::Uniform,
        vertex::{TexturedVertex, Vertex, cube},
    },
    flow::{self, Lesson, LessonConstructor, Out},
    pipelines::{
        basic::RenderState,
        texture::{sampled_texture_bind_group, sampled_texture_layout},
    },
    render::{Draw, Render},
    resources,
    settings::Settings,
    shader::Shader,
    time::FrameTime,
};

pub const TEXTURE_FILE: &str = "textures/container.jpg";
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;
/// Degrees per second every cube turns on top of its fixed tilt.
pub const SPIN_SPEED: f32 = 20.0;

fn cube_instances(spin: f32) -> Vec<ModelRaw> {
    (0..CUBE_POSITIONS.len())
        .map(|i| cube_model(i, spin).into())
        .collect()
}

#[derive(Debug)]
pub struct CameraLesson {
    shader: Shader,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    texture_bind_group: wgpu::BindGroup,
    pub camera: Camera,
    pub projection: Projection,
    controller: CameraController,
    camera_uniform: Uniform<CameraUniform>,
}

impl CameraLesson {
    pub fn settings() -> Settings {
        Settings::default().with_title("Camera")
    }

    pub fn constructor() -> LessonConstructor {
        flow::constructor(Self::new)
    }

    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let device = &ctx.device;

        let camera = Camera::new((0.0, 0.0, 3.0), cgmath::Vector3::unit_y(), YAW, PITCH);
        let projection = Projection::new(ctx.width, ctx.height, ZNEAR, ZFAR);
        let mut view_proj = CameraUniform::new();
        view_proj.update_view_proj(&camera, &projection);
        let camera_uniform = Uniform::new(device, view_proj, wgpu::ShaderStages::VERTEX, "camera");

        let texture =
            resources::load_texture_or_checkerboard(TEXTURE_FILE, device, &ctx.queue).await?;
        let texture_layout = sampled_texture_layout(device);
        let texture_bind_group = sampled_texture_bind_group(
            device,
            &texture_layout,
            &texture,
            "cube_texture_bind_group",
        );

        let shader = Shader::load(
            device,
            "shaders/camera.wgsl",
            "shaders/camera.wgsl",
            &[&camera_uniform.bind_group_layout, &texture_layout],
            &[TexturedVertex::desc(), ModelRaw::desc()],
            &RenderState::opaque(ctx.format),
        )
        .await?;

        let vertices = cube();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Instance Buffer"),
            contents: bytemuck::cast_slice(&cube_instances(0.0)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            shader,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            instance_buffer,
            texture_bind_group,
            camera,
            projection,
            controller: CameraController::new(),
            camera_uniform,
        })
    }
}

impl Lesson for CameraLesson {
    fn on_window_events(&mut self, _ctx: &Context, event: &WindowEvent) -> Out {
        self.controller.handle_window_events(event);
        if let WindowEvent::Resized(size) = event {
            self.projection.resize(size.width, size.height);
        }
        Out::Empty
    }

    fn on_device_events(&mut self, _ctx: &Context, event: &DeviceEvent) -> Out {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.controller.process_mouse(*dx, *dy);
        }
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, time: &FrameTime) -> Out {
        self.controller.update(&mut self.camera, time.dt_secs());

        let mut view_proj = *self.camera_uniform.get();
        view_proj.update_view_proj(&self.camera, &self.projection);
        self.camera_uniform.set(&ctx.queue, view_proj);

        let instances = cube_instances(time.elapsed * SPIN_SPEED);
        ctx.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        Out::Empty
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Draw::new(&self.shader, 0..self.vertex_count)
            .with_vertex_buffer(&self.vertex_buffer)
            .with_vertex_buffer(&self.instance_buffer)
            .with_bind_group(&self.camera_uniform.bind_group)
            .with_bind_group(&self.texture_bind_group)
            .instanced(0..CUBE_POSITIONS.len() as u32)
            .into()
    }
}
