use wgpu_lessons::lessons::particles::Particles;

fn main() -> anyhow::Result<()> {
    wgpu_lessons::run(Particles::settings(), vec![Particles::constructor()])
}
