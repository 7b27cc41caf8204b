//! Lesson data structures: vertices, instances, textures and uniforms.
//!
//! - `vertex` holds the vertex formats and the static geometry of the lessons
//! - `instance` holds per-instance data (offsets, model matrices)
//! - `texture` wraps GPU textures and their creation
//! - `uniform` is a typed uniform buffer with its bind group

pub mod instance;
pub mod texture;
pub mod uniform;
pub mod vertex;
