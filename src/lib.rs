//! wgpu-lessons
//!
//! A set of small, self-contained graphics demos built on wgpu and winit.
//! Each lesson opens one window, builds its GPU resources once, then runs a
//! render loop until Escape is pressed or the window is closed. The crate
//! owns the shared scaffolding so a lesson only describes its resources and
//! what it draws.
//!
//! High-level modules
//! - `camera`: Euler-angle fly camera, projection, uniform and input controller
//! - `context`: window surface, device, queue and depth buffer
//! - `data_structures`: vertex layouts, instance data, textures and uniforms
//! - `flow`: the `Lesson` trait and the render loop driving it
//! - `lessons`: the demos themselves
//! - `pipelines`: render/compute pipeline and bind group layout helpers
//! - `render`: what a lesson draws each frame
//! - `resources`: assets directory lookup and file/texture loading
//! - `settings`: per-lesson window and loop configuration
//! - `shader`: compiling WGSL programs with readable diagnostics
//! - `time`: frame clock and FPS reporting
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod lessons;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod settings;
pub mod shader;
pub mod time;

// Re-exports commonly used types for convenience in downstream code.
pub use flow::{Lesson, LessonConstructor, Out, run};
pub use settings::Settings;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
