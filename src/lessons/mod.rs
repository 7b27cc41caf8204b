//! The demos.
//!
//! Every lesson is a [`crate::flow::Lesson`] with two associated helpers:
//! `settings()` describes its window and `constructor()` boxes its async
//! constructor for [`crate::flow::run`]. The binaries under `src/bin` are one
//! line wrappers around these.
//!
//! - `hello_window`: just a clear colour
//! - `hello_triangle`: one triangle from inline shader sources
//! - `instancing`: a grid of 100 quads drawn with one instanced draw
//! - `compute_texture`: a compute shader paints a texture shown on a full-screen quad
//! - `particles`: a compute shader moves points that are then drawn from the same buffer
//! - `camera`: textured cubes seen through a fly camera

pub mod camera;
pub mod compute_texture;
pub mod hello_triangle;
pub mod hello_window;
pub mod instancing;
pub mod particles;
