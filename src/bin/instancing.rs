use wgpu_lessons::lessons::instancing::Instancing;

fn main() -> anyhow::Result<()> {
    wgpu_lessons::run(Instancing::settings(), vec![Instancing::constructor()])
}
