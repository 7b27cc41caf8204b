//! Vertex formats used by the lessons.
//!
//! Every type here is `#[repr(C)]` and `Pod` so that slices of it can be
//! uploaded with `bytemuck::cast_slice`, and implements [`Vertex`] to tell
//! wgpu how the bytes map to shader `@location`s.

use std::mem;

/// Describes the memory layout of one vertex (or instance) in a buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// A bare 3D position at `@location(0)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<PositionVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// 2D position at `@location(0)` and an RGB colour at `@location(1)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColouredVertex {
    pub position: [f32; 2],
    pub colour: [f32; 3],
}

impl Vertex for ColouredVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ColouredVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// 3D position at `@location(0)` and texture coordinates at `@location(1)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for TexturedVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// A particle position. The same buffer is bound as compute storage, so the
/// layout has to match `array<vec2<f32>>` in the compute shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 2],
}

impl Vertex for ParticleVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ParticleVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

pub const TRIANGLE: [PositionVertex; 3] = [
    PositionVertex {
        position: [-0.5, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.5, -0.5, 0.0],
    },
    PositionVertex {
        position: [0.0, 0.5, 0.0],
    },
];

/// Two triangles of a small quad, one colour per corner.
pub const COLOURED_QUAD: [ColouredVertex; 6] = [
    ColouredVertex {
        position: [-0.05, 0.05],
        colour: [1.0, 0.0, 0.0],
    },
    ColouredVertex {
        position: [0.05, -0.05],
        colour: [0.0, 1.0, 0.0],
    },
    ColouredVertex {
        position: [-0.05, -0.05],
        colour: [0.0, 0.0, 1.0],
    },
    ColouredVertex {
        position: [-0.05, 0.05],
        colour: [1.0, 0.0, 0.0],
    },
    ColouredVertex {
        position: [0.05, -0.05],
        colour: [0.0, 1.0, 0.0],
    },
    ColouredVertex {
        position: [0.05, 0.05],
        colour: [0.0, 1.0, 1.0],
    },
];

/// Full-screen quad as a triangle strip. `v` runs top-down to match
/// wgpu's texture origin.
pub const SCREEN_QUAD: [TexturedVertex; 4] = [
    TexturedVertex {
        position: [-1.0, 1.0, 0.0],
        tex_coords: [0.0, 0.0],
    },
    TexturedVertex {
        position: [-1.0, -1.0, 0.0],
        tex_coords: [0.0, 1.0],
    },
    TexturedVertex {
        position: [1.0, 1.0, 0.0],
        tex_coords: [1.0, 0.0],
    },
    TexturedVertex {
        position: [1.0, -1.0, 0.0],
        tex_coords: [1.0, 1.0],
    },
];

/// Unit cube as 36 non-indexed vertices, counter-clockwise when seen from outside.
pub fn cube() -> Vec<TexturedVertex> {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // origin corner, u direction, v direction
        ([-0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // front  (+z)
        ([0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // back   (-z)
        ([-0.5, -0.5, -0.5], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]), // left   (-x)
        ([0.5, -0.5, 0.5], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]), // right  (+x)
        ([-0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]), // top    (+y)
        ([-0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]), // bottom (-y)
    ];
    let corner = |o: [f32; 3], u: [f32; 3], v: [f32; 3], s: f32, t: f32| TexturedVertex {
        position: [
            o[0] + u[0] * s + v[0] * t,
            o[1] + u[1] * s + v[1] * t,
            o[2] + u[2] * s + v[2] * t,
        ],
        tex_coords: [s, 1.0 - t],
    };
    faces
        .iter()
        .flat_map(|&(o, u, v)| {
            [
                corner(o, u, v, 0.0, 0.0),
                corner(o, u, v, 1.0, 0.0),
                corner(o, u, v, 1.0, 1.0),
                corner(o, u, v, 0.0, 0.0),
                corner(o, u, v, 1.0, 1.0),
                corner(o, u, v, 0.0, 1.0),
            ]
        })
        .collect()
}
