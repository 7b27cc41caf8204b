//! Points moved by a compute shader and drawn from the same buffer.
//!
//! The particle buffer is created with both `STORAGE` and `VERTEX` usage.
//! The compute pass of a frame updates the positions in place, then the
//! render pass of that frame reads them back as vertices.

use wgpu::util::DeviceExt;

use crate::{
    context::{ComputeLimits, Context, InitContext},
    data_structures::{
        uniform::{ColourUniform, TimeUniform, Uniform},
        vertex::{ParticleVertex, Vertex},
    },
    flow::{self, Lesson, LessonConstructor, Out},
    pipelines::{
        basic::RenderState,
        compute::{storage_buffer_layout, workgroups_for},
    },
    render::{Draw, Render},
    settings::Settings,
    shader::{ComputeShader, Shader},
    time::FrameTime,
};

pub const PARTICLE_COUNT: u32 = 1024;
/// Must match `@workgroup_size` in `particle_update.wgsl`.
pub const WORKGROUP_SIZE: u32 = 64;
/// Seeds lie in `[0, SEED_EXTENT)` on both axes.
pub const SEED_EXTENT: f32 = 2.0;

/// Deterministic initial positions spread evenly over `[0, 2)²`.
///
/// Uses the additive R2 sequence (plastic-number based), which fills the
/// square without the clumps of independent uniform samples.
pub fn seed_particles(count: u32) -> Vec<ParticleVertex> {
    // plastic number, the real root of x³ = x + 1
    const G: f64 = 1.324_717_957_244_746;
    let (a1, a2) = (1.0 / G, 1.0 / (G * G));
    let upper = SEED_EXTENT - SEED_EXTENT * f32::EPSILON;
    (0..count)
        .map(|i| {
            let n = f64::from(i);
            let x = (0.5 + a1 * n).fract() * f64::from(SEED_EXTENT);
            let y = (0.5 + a2 * n).fract() * f64::from(SEED_EXTENT);
            ParticleVertex {
                position: [(x as f32).min(upper), (y as f32).min(upper)],
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct Particles {
    update: ComputeShader,
    shader: Shader,
    particle_buffer: wgpu::Buffer,
    storage_bind_group: wgpu::BindGroup,
    time: Uniform<TimeUniform>,
    colour: Uniform<ColourUniform>,
}

impl Particles {
    pub fn settings() -> Settings {
        Settings::default()
            .with_title("Particles")
            .with_size(800, 800)
    }

    pub fn constructor() -> LessonConstructor {
        flow::constructor(Self::new)
    }

    pub async fn new(ctx: InitContext) -> anyhow::Result<Self> {
        let workgroups = [workgroups_for(PARTICLE_COUNT, WORKGROUP_SIZE), 1, 1];
        let limits = ComputeLimits::from(&ctx.device.limits());
        anyhow::ensure!(
            limits.allows(workgroups, [WORKGROUP_SIZE, 1, 1]),
            "Dispatching {:?} workgroups of {} exceeds the device limits {:?}",
            workgroups,
            WORKGROUP_SIZE,
            limits
        );

        let device = &ctx.device;
        let particles = seed_particles(PARTICLE_COUNT);
        let particle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Buffer"),
            contents: bytemuck::cast_slice(&particles),
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::COPY_DST,
        });

        let storage_layout = storage_buffer_layout(device);
        let storage_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &storage_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: particle_buffer.as_entire_binding(),
            }],
            label: Some("particle_storage_bind_group"),
        });

        let time = Uniform::new(
            device,
            TimeUniform::new(0.0, 0.0),
            wgpu::ShaderStages::COMPUTE,
            "particle_time_uniform",
        );
        let colour = Uniform::new(
            device,
            ColourUniform::new(1.0, 1.0, 1.0, 1.0),
            wgpu::ShaderStages::FRAGMENT,
            "u_color",
        );

        let update = ComputeShader::load(
            device,
            "shaders/particle_update.wgsl",
            &[&storage_layout, &time.bind_group_layout],
        )
        .await?;
        let shader = Shader::load(
            device,
            "shaders/particle.wgsl",
            "shaders/particle.wgsl",
            &[&colour.bind_group_layout],
            &[ParticleVertex::desc()],
            &RenderState::opaque(ctx.format).with_topology(wgpu::PrimitiveTopology::PointList),
        )
        .await?;

        Ok(Self {
            update,
            shader,
            particle_buffer,
            storage_bind_group,
            time,
            colour,
        })
    }
}

impl Lesson for Particles {
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
        self.update.dispatch(
            encoder,
            &[&self.storage_bind_group, &self.time.bind_group],
            [workgroups_for(PARTICLE_COUNT, WORKGROUP_SIZE), 1, 1],
        );
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Draw::new(&self.shader, 0..PARTICLE_COUNT)
            .with_vertex_buffer(&self.particle_buffer)
            .with_bind_group(&self.colour.bind_group)
            .into()
    }
}
