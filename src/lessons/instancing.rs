//! One quad, a hundred copies.
//!
//! The quad's six vertices live in one buffer and the per-instance offsets in
//! a second one stepped per instance. Every frame the offsets are recomputed
//! from the elapsed time and written over the same buffer.

use wgpu::util::DeviceExt;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        instance::{GRID_INSTANCES, Offset, animated_offset_grid},
        vertex::{COLOURED_QUAD, ColouredVertex, Vertex},
    },
    flow::{self, Lesson, LessonConstructor, Out},
    pipelines::basic::RenderState,
    render::{Draw, Render},
    settings::Settings,
    shader::Shader,
    time::FrameTime,
};

#[derive(Debug)]
pub struct Instancing {
    shader: Shader,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
}

impl Instancing {
    pub fn settings() -> Settings {
        Settings::default().with_title("Instancing")
    }

    pub fn constructor() -> LessonConstructor {
        flow::constructor(Self::new)
    }

    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let shader = Shader::load(
            &ctx.device,
            "shaders/instancing.vert.wgsl",
            "shaders/instancing.frag.wgsl",
            &[],
            &[ColouredVertex::desc(), Offset::desc()],
            &RenderState::opaque(ctx.format),
        )
        .await?;

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&COLOURED_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let offsets = animated_offset_grid(0.0);
        let instance_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Offset Instance Buffer"),
                contents: bytemuck::cast_slice(&offsets),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });

        Ok(Self {
            shader,
            vertex_buffer,
            instance_buffer,
        })
    }
}

impl Lesson for Instancing {
    fn on_update(&mut self, ctx: &Context, time: &FrameTime) -> Out {
        let offsets = animated_offset_grid(time.elapsed);
        ctx.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&offsets));
        Out::Empty
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Draw::new(&self.shader, 0..COLOURED_QUAD.len() as u32)
            .with_vertex_buffer(&self.vertex_buffer)
            .with_vertex_buffer(&self.instance_buffer)
            .instanced(0..GRID_INSTANCES as u32)
            .into()
    }
}
