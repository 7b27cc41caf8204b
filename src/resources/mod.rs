//! Loading lesson assets (shader sources and images) from disk.
//!
//! Assets live under `./assets` relative to the working directory. Set
//! `LESSONS_ASSETS` to point somewhere else.

use std::path::PathBuf;

use anyhow::Context as _;

use crate::data_structures::texture;

pub const ASSETS_ENV: &str = "LESSONS_ASSETS";

pub fn assets_root() -> PathBuf {
    std::env::var_os(ASSETS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./").join("assets"))
}

pub fn asset_path(file_name: &str) -> PathBuf {
    assets_root().join(file_name)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = asset_path(file_name);
    let txt = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;
    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;
    Ok(data)
}

/// Load an image from the assets directory into a sampled texture.
pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    let format = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, file_name, format)
}

/// Like [`load_texture`] but never fails: a missing or broken image is logged
/// and replaced by a checkerboard.
pub async fn load_texture_or_checkerboard(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    match load_texture(file_name, device, queue).await {
        Ok(texture) => Ok(texture),
        Err(e) => {
            log::warn!("Failed to load texture {file_name}: {e:#}. Using a checkerboard instead.");
            texture::Texture::create_checkerboard(device, queue, 256, 8)
        }
    }
}
