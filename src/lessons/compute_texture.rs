//! A compute shader paints a texture, a full-screen quad shows it.
//!
//! Each frame the compute pass rewrites all 1000x1000 texels from the elapsed
//! time. The render pass of the same frame samples the result; wgpu orders
//! the storage write before the sampled read because both are recorded into
//! one command encoder.

use wgpu::util::DeviceExt;

use crate::{
    context::{ComputeLimits, Context, InitContext},
    data_structures::{
        texture::Texture,
        uniform::{TimeUniform, Uniform},
        vertex::{SCREEN_QUAD, TexturedVertex, Vertex},
    },
    flow::{self, Lesson, LessonConstructor, Out},
    pipelines::{
        basic::RenderState,
        compute::{storage_texture_layout, workgroups_for},
        texture::{sampled_texture_bind_group, sampled_texture_layout},
    },
    render::{Draw, Render},
    settings::Settings,
    shader::{ComputeShader, Shader},
    time::FrameTime,
};

pub const TEXTURE_WIDTH: u32 = 1000;
pub const TEXTURE_HEIGHT: u32 = 1000;
/// Must match `@workgroup_size` in `compute_texture.wgsl`.
pub const WORKGROUP_SIZE: [u32; 3] = [10, 10, 1];

/// Workgroups needed to cover the whole texture.
pub fn workgroups() -> [u32; 3] {
    [
        workgroups_for(TEXTURE_WIDTH, WORKGROUP_SIZE[0]),
        workgroups_for(TEXTURE_HEIGHT, WORKGROUP_SIZE[1]),
        1,
    ]
}

#[derive(Debug)]
pub struct ComputeTexture {
    compute: ComputeShader,
    screen_quad: Shader,
    quad_buffer: wgpu::Buffer,
    storage_bind_group: wgpu::BindGroup,
    sampled_bind_group: wgpu::BindGroup,
    time: Uniform<TimeUniform>,
}

impl ComputeTexture {
    pub fn settings() -> Settings {
        // Uncapped frame rate so the FPS log means something
        Settings::default()
            .with_title("Compute Texture")
            .with_vsync(false)
    }

    pub fn constructor() -> LessonConstructor {
        flow::constructor(Self::new)
    }

    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let limits = ComputeLimits::from(&ctx.device.limits());
        anyhow::ensure!(
            limits.allows(workgroups(), WORKGROUP_SIZE),
            "Dispatching {:?} workgroups of {:?} exceeds the device limits {:?}",
            workgroups(),
            WORKGROUP_SIZE,
            limits
        );

        let device = &ctx.device;
        let texture = Texture::create_storage_texture(
            device,
            TEXTURE_WIDTH,
            TEXTURE_HEIGHT,
            "Compute Output",
        );

        let storage_layout = storage_texture_layout(device, Texture::STORAGE_FORMAT);
        let storage_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &storage_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            }],
            label: Some("compute_output_storage_bind_group"),
        });

        let sampled_layout = sampled_texture_layout(device);
        let sampled_bind_group = sampled_texture_bind_group(
            device,
            &sampled_layout,
            &texture,
            "compute_output_bind_group",
        );

        let time = Uniform::new(
            device,
            TimeUniform::new(0.0, 0.0),
            wgpu::ShaderStages::COMPUTE,
            "time_uniform",
        );

        let compute = ComputeShader::load(
            device,
            "shaders/compute_texture.wgsl",
            &[&storage_layout, &time.bind_group_layout],
        )
        .await?;

        let screen_quad = Shader::load(
            device,
            "shaders/screen_quad.wgsl",
            "shaders/screen_quad.wgsl",
            &[&sampled_layout],
            &[TexturedVertex::desc()],
            &RenderState::opaque(ctx.format).with_topology(wgpu::PrimitiveTopology::TriangleStrip),
        )
        .await?;

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&SCREEN_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            compute,
            screen_quad,
            quad_buffer,
            storage_bind_group,
            sampled_bind_group,
            time,
        })
    }
}

impl Lesson for ComputeTexture {
    fn on_init(&mut self, ctx: &mut Context) -> Out {
        ctx.compute_limits().log();
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, time: &FrameTime) -> Out {
        self.time
            .set(&ctx.queue, TimeUniform::new(time.elapsed, time.dt_secs()));
        Out::Empty
    }

    fn on_compute(&self, _ctx: &Context, encoder: &mut wgpu::CommandEncoder) {
        self.compute.dispatch(
            encoder,
            &[&self.storage_bind_group, &self.time.bind_group],
            workgroups(),
        );
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Draw::new(&self.screen_quad, 0..SCREEN_QUAD.len() as u32)
            .with_vertex_buffer(&self.quad_buffer)
            .with_bind_group(&self.sampled_bind_group)
            .into()
    }
}
