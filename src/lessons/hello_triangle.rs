use wgpu::util::DeviceExt;

use crate::{
    context::InitContext,
    data_structures::vertex::{PositionVertex, TRIANGLE, Vertex},
    flow::{self, Lesson, LessonConstructor},
    lessons::hello_window::CLEAR_COLOUR,
    pipelines::basic::RenderState,
    render::{Draw, Render},
    settings::Settings,
    shader::Shader,
};

const VERTEX_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.2, 1.0);
}
"#;

/// One orange triangle, compiled from sources embedded in the binary.
#[derive(Debug)]
pub struct HelloTriangle {
    shader: Shader,
    vertex_buffer: wgpu::Buffer,
}

impl HelloTriangle {
    pub fn settings() -> Settings {
        Settings::default()
            .with_title("Hello Triangle")
            .with_clear_colour(CLEAR_COLOUR)
    }

    pub fn constructor() -> LessonConstructor {
        flow::constructor(Self::new)
    }

    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let shader = Shader::from_sources(
            &ctx.device,
            "hello_triangle",
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            &[],
            &[PositionVertex::desc()],
            &RenderState::opaque(ctx.format),
        )
        .await?;

        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Triangle Vertex Buffer"),
                contents: bytemuck::cast_slice(&TRIANGLE),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            shader,
            vertex_buffer,
        })
    }
}

impl Lesson for HelloTriangle {
    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Draw::new(&self.shader, 0..TRIANGLE.len() as u32)
            .with_vertex_buffer(&self.vertex_buffer)
            .into()
    }
}
