use wgpu_lessons::lessons::hello_window::HelloWindow;

fn main() -> anyhow::Result<()> {
    wgpu_lessons::run(HelloWindow::settings(), vec![HelloWindow::constructor()])
}
