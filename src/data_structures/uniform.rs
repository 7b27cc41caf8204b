//! Typed uniform buffers.
//!
//! Where a GL program sets uniforms one by one by name, a wgpu pipeline reads
//! them from a buffer bound through a bind group. [`Uniform<T>`] keeps the
//! buffer, its layout and bind group together and replaces "set uniform by
//! name" with writing a whole `#[repr(C)]` struct.

use wgpu::util::DeviceExt;

#[derive(Debug)]
pub struct Uniform<T: bytemuck::Pod> {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    value: T,
}

impl<T: bytemuck::Pod> Uniform<T> {
    pub fn new(
        device: &wgpu::Device,
        value: T,
        visibility: wgpu::ShaderStages,
        label: &str,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[value]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = mk_bind_group_layout(device, visibility, label);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self {
            buffer,
            bind_group,
            bind_group_layout,
            value,
        }
    }

    /// Store `value` and schedule its upload with the next queue submission.
    pub fn set(&mut self, queue: &wgpu::Queue, value: T) {
        self.value = value;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[value]));
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

pub fn mk_bind_group_layout(
    device: &wgpu::Device,
    visibility: wgpu::ShaderStages,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

/// `u_color` of the particle and triangle shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColourUniform {
    pub colour: [f32; 4],
}

impl ColourUniform {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            colour: [r, g, b, a],
        }
    }
}

/// Time input of the animated compute shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TimeUniform {
    pub t: f32,
    pub dt: f32,
    // Uniform buffers are laid out in 16 byte blocks
    pub _padding: [f32; 2],
}

impl TimeUniform {
    pub fn new(t: f32, dt: f32) -> Self {
        Self {
            t,
            dt,
            _padding: [0.0; 2],
        }
    }
}
