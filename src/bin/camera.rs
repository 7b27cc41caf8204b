use wgpu_lessons::lessons::camera::CameraLesson;

fn main() -> anyhow::Result<()> {
    wgpu_lessons::run(CameraLesson::settings(), vec![CameraLesson::constructor()])
}
