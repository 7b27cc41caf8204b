//! Pipeline construction helpers.
//!
//! - `basic` builds render pipelines from vertex/fragment modules
//! - `compute` builds compute pipelines and storage bind group layouts
//! - `texture` holds the sampled texture bind group layout

pub mod basic;
pub mod compute;
pub mod texture;
