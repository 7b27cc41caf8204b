use wgpu_lessons::lessons::hello_triangle::HelloTriangle;

fn main() -> anyhow::Result<()> {
    wgpu_lessons::run(HelloTriangle::settings(), vec![HelloTriangle::constructor()])
}
