//! Per-instance data for GPU instancing.
//!
//! Instances are stored in their own vertex buffer whose step mode is
//! `Instance`, so the vertex shader advances to the next element once per
//! drawn instance instead of once per vertex.

use std::mem;

use cgmath::Vector2;

use crate::data_structures::vertex::Vertex;

/// Number of quads in the instancing grid (10 x 10).
pub const GRID_INSTANCES: usize = 100;

/// A 2D translation applied to every vertex of one instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Offset {
    pub offset: [f32; 2],
}

impl From<Vector2<f32>> for Offset {
    fn from(v: Vector2<f32>) -> Self {
        Self { offset: v.into() }
    }
}

/**
 * The offset lives at `@location(2)`, right after the two per-vertex
 * attributes of the coloured quad.
 */
impl Vertex for Offset {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Offset>() as wgpu::BufferAddress,
            // Switch to the next offset once per instance, not per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Offsets of the 10 x 10 quad grid, shifted by `shift`.
///
/// Rows and columns run over -10..10 in steps of two and are scaled into
/// clip space by 1/10, so with no shift the grid spans [-1.0, 0.8].
pub fn offset_grid(shift: Vector2<f32>) -> Vec<Offset> {
    let mut offsets = Vec::with_capacity(GRID_INSTANCES);
    for y in (-10..10).step_by(2) {
        for x in (-10..10).step_by(2) {
            offsets.push(Offset {
                offset: [x as f32 / 10.0 + shift.x, y as f32 / 10.0 + shift.y],
            });
        }
    }
    offsets
}

/// Offset grid at time `t` seconds: the whole grid circles around `(sin t, cos t)`.
pub fn animated_offset_grid(t: f32) -> Vec<Offset> {
    offset_grid(Vector2::new(t.sin(), t.cos()))
}

/// Per-instance model matrix, uploaded as four `vec4` columns at locations 5..=8.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelRaw {
    pub model: [[f32; 4]; 4],
}

impl From<cgmath::Matrix4<f32>> for ModelRaw {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        Self { model: m.into() }
    }
}

impl Vertex for ModelRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// World positions of the ten cubes in the camera lesson.
pub const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

/// Model matrix of cube `i`: translated to its slot and tilted by `20 * i` degrees
/// around a fixed diagonal, plus `spin` extra degrees.
pub fn cube_model(i: usize, spin: f32) -> cgmath::Matrix4<f32> {
    use cgmath::InnerSpace;

    let position: cgmath::Vector3<f32> = CUBE_POSITIONS[i % CUBE_POSITIONS.len()].into();
    let axis = cgmath::Vector3::new(1.0, 0.3, 0.5).normalize();
    cgmath::Matrix4::from_translation(position)
        * cgmath::Matrix4::from_axis_angle(axis, cgmath::Deg(20.0 * i as f32 + spin))
}
