use wgpu_lessons::{
    context::choose_present_mode,
    lessons::{
        compute_texture::ComputeTexture, hello_window::HelloWindow, particles::Particles,
    },
    settings::Settings,
};

#[test]
fn should_default_to_an_800x600_window_with_vsync() {
    let settings = Settings::default();
    assert_eq!(settings.title, "LearnWGPU");
    assert_eq!((settings.width, settings.height), (800, 600));
    assert!(settings.vsync);
    assert_eq!(settings.clear_colour, Settings::DEFAULT_CLEAR_COLOUR);
    assert_eq!(settings.fps_log_interval, 500);
    assert_eq!(settings.log_filter, None);
}

#[test]
fn should_override_defaults_with_builders() {
    let settings = Settings::default()
        .with_title("Test")
        .with_size(1024, 512)
        .with_vsync(false)
        .with_clear_colour(wgpu::Color::WHITE)
        .with_fps_log_interval(0)
        .with_log_filter("debug");

    assert_eq!(settings.title, "Test");
    assert_eq!((settings.width, settings.height), (1024, 512));
    assert!(!settings.vsync);
    assert_eq!(settings.clear_colour, wgpu::Color::WHITE);
    assert_eq!(settings.fps_log_interval, 0);
    assert_eq!(settings.log_filter.as_deref(), Some("debug"));
    assert_eq!(settings.aspect(), 2.0);
}

#[test]
fn should_configure_lesson_windows() {
    let window = HelloWindow::settings();
    assert_eq!(
        window.clear_colour,
        wgpu::Color {
            r: 0.5,
            g: 0.0,
            b: 0.5,
            a: 1.0
        }
    );

    let compute = ComputeTexture::settings();
    assert!(!compute.vsync);
    assert_eq!((compute.width, compute.height), (800, 600));

    let particles = Particles::settings();
    assert_eq!((particles.width, particles.height), (800, 800));
}

#[test]
fn should_pick_present_mode_from_vsync() {
    use wgpu::PresentMode::*;

    assert_eq!(choose_present_mode(true, &[Immediate, Mailbox, Fifo]), Fifo);
    assert_eq!(choose_present_mode(false, &[Fifo, Mailbox, Immediate]), Immediate);
    assert_eq!(choose_present_mode(false, &[Fifo, Mailbox]), Mailbox);
    assert_eq!(choose_present_mode(false, &[Fifo]), Fifo);
}
