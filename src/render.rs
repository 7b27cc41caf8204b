//! What a lesson draws each frame.
//!
//! Lessons describe their draw calls as a [`Render`] value instead of touching
//! the render pass themselves. The render loop owns the single render pass of
//! the frame and replays every lesson's `Render` into it.
//!
//! # Key types
//!
//! - [`Render<'a, 'pass>`] is the enum describing render operations
//! - [`Draw<'a>`] is one draw call: program, buffers, bind groups and counts
//!

use std::ops::Range;

use wgpu::RenderPass;

use crate::{context::Context, shader::Shader};

/// One draw call.
///
/// Vertex buffers are bound to slots in order (slot 0 for per-vertex data,
/// slot 1 usually for per-instance data), bind groups to groups in order.
#[derive(Clone)]
pub struct Draw<'a> {
    pub shader: &'a Shader,
    pub vertex_buffers: Vec<&'a wgpu::Buffer>,
    pub index_buffer: Option<(&'a wgpu::Buffer, wgpu::IndexFormat)>,
    pub bind_groups: Vec<&'a wgpu::BindGroup>,
    /// Vertices, or indices when an index buffer is set.
    pub vertices: Range<u32>,
    pub instances: Range<u32>,
}

impl<'a> Draw<'a> {
    pub fn new(shader: &'a Shader, vertices: Range<u32>) -> Self {
        Self {
            shader,
            vertex_buffers: Vec::new(),
            index_buffer: None,
            bind_groups: Vec::new(),
            vertices,
            instances: 0..1,
        }
    }

    pub fn with_vertex_buffer(mut self, buffer: &'a wgpu::Buffer) -> Self {
        self.vertex_buffers.push(buffer);
        self
    }

    pub fn with_index_buffer(
        mut self,
        buffer: &'a wgpu::Buffer,
        format: wgpu::IndexFormat,
    ) -> Self {
        self.index_buffer = Some((buffer, format));
        self
    }

    pub fn with_bind_group(mut self, group: &'a wgpu::BindGroup) -> Self {
        self.bind_groups.push(group);
        self
    }

    pub fn instanced(mut self, instances: Range<u32>) -> Self {
        self.instances = instances;
        self
    }

    /// A draw without vertices or instances does nothing on the GPU.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.instances.is_empty()
    }

    fn record(self, render_pass: &mut RenderPass<'_>) {
        self.shader.use_program(render_pass);
        for (index, group) in self.bind_groups.into_iter().enumerate() {
            render_pass.set_bind_group(index as u32, group, &[]);
        }
        for (slot, buffer) in self.vertex_buffers.into_iter().enumerate() {
            render_pass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }
        match self.index_buffer {
            Some((buffer, format)) => {
                render_pass.set_index_buffer(buffer.slice(..), format);
                render_pass.draw_indexed(self.vertices, 0, self.instances);
            }
            None => render_pass.draw(self.vertices, self.instances),
        }
    }
}

/// Specifies how a lesson should be rendered.
///
/// # Variants
///
/// - `None` renders nothing (e.g. a lesson that only clears the screen)
/// - `Draw(Draw)` issues a single draw call
/// - `Composed(Vec<Render>)` renders each element in order
/// - `Custom(...)` invokes a closure with direct access to the render pass
///
pub enum Render<'a, 'pass>
where
    'pass: 'a,
{
    None,
    Draw(Draw<'a>),
    Composed(Vec<Render<'a, 'pass>>),
    Custom(Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'pass>)>),
}

impl<'a, 'pass> Render<'a, 'pass> {
    /// Number of draw calls this render expands to, not counting custom closures.
    pub fn draw_count(&self) -> usize {
        match self {
            Render::None | Render::Custom(_) => 0,
            Render::Draw(draw) => usize::from(!draw.is_empty()),
            Render::Composed(renders) => renders.iter().map(Render::draw_count).sum(),
        }
    }

    pub(crate) fn record(self, ctx: &Context, render_pass: &mut RenderPass<'pass>) {
        match self {
            Render::None => (),
            Render::Draw(draw) => {
                if draw.is_empty() {
                    log::warn!(
                        "{}: you attempted to render something with zero vertices or instances",
                        draw.shader.label
                    );
                    return;
                }
                draw.record(render_pass);
            }
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.record(ctx, render_pass)),
            Render::Custom(f) => f(ctx, render_pass),
        }
    }
}

impl<'a, 'pass> From<Draw<'a>> for Render<'a, 'pass> {
    fn from(draw: Draw<'a>) -> Self {
        Render::Draw(draw)
    }
}
