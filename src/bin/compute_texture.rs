use wgpu_lessons::lessons::compute_texture::ComputeTexture;

fn main() -> anyhow::Result<()> {
    wgpu_lessons::run(ComputeTexture::settings(), vec![ComputeTexture::constructor()])
}
