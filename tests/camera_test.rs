use cgmath::{InnerSpace, Vector3};
use wgpu_lessons::camera::{
    Camera, CameraController, CameraUniform, Movement, PITCH_LIMIT, Projection, ZOOM,
};
use winit::{event::ElementState, keyboard::KeyCode};

fn assert_orthonormal(camera: &Camera) {
    let (f, r, u) = (camera.front(), camera.right(), camera.up());
    for v in [f, r, u] {
        assert!((v.magnitude() - 1.0).abs() < 1e-4);
    }
    assert!(f.dot(r).abs() < 1e-4);
    assert!(f.dot(u).abs() < 1e-4);
    assert!(r.dot(u).abs() < 1e-4);
}

#[test]
fn should_look_down_negative_z_by_default() {
    let camera = Camera::default();
    let front = camera.front();
    assert!(front.x.abs() < 1e-6);
    assert!(front.y.abs() < 1e-6);
    assert!((front.z + 1.0).abs() < 1e-6);
    assert!((camera.right().x - 1.0).abs() < 1e-6);
    assert_eq!(camera.fov(), ZOOM);
    assert_orthonormal(&camera);
}

#[test]
fn should_clamp_pitch_when_constrained() {
    let mut camera = Camera::default();
    camera.rotate(0.0, 10_000.0, true);
    assert_eq!(camera.pitch(), PITCH_LIMIT);
    assert_orthonormal(&camera);

    camera.rotate(0.0, -100_000.0, true);
    assert_eq!(camera.pitch(), -PITCH_LIMIT);
    assert_orthonormal(&camera);
}

#[test]
fn should_not_clamp_pitch_when_unconstrained() {
    let mut camera = Camera::default();
    camera.rotate(0.0, 1000.0, false);
    assert!(camera.pitch() > PITCH_LIMIT);
}

#[test]
fn should_scale_mouse_offsets_by_sensitivity() {
    let mut camera = Camera::default();
    let yaw = camera.yaw();
    camera.rotate(100.0, 50.0, true);
    assert!((camera.yaw() - (yaw + 10.0)).abs() < 1e-4);
    assert!((camera.pitch() - 5.0).abs() < 1e-4);
    assert_orthonormal(&camera);
}

#[test]
fn should_keep_fov_between_one_and_max() {
    let mut camera = Camera::default();
    camera.zoom(-10.0);
    assert_eq!(camera.fov(), ZOOM);
    camera.zoom(100.0);
    assert_eq!(camera.fov(), 1.0);
    camera.zoom(-30.0);
    assert_eq!(camera.fov(), 31.0);

    let mut wide = Camera::default().set_max_fov(90.0);
    wide.zoom(-100.0);
    assert_eq!(wide.fov(), 90.0);

    let narrow = Camera::default().set_max_fov(30.0);
    assert_eq!(narrow.fov(), 30.0);
}

#[test]
fn should_move_along_camera_axes() {
    let mut camera = Camera::new((0.0, 0.0, 3.0), Vector3::unit_y(), -90.0, 0.0);
    camera.move_in(Movement::Forward, 1.0);
    assert!((camera.position.z - (3.0 - camera.speed)).abs() < 1e-4);
    camera.move_in(Movement::Backward, 1.0);
    assert!((camera.position.z - 3.0).abs() < 1e-4);
    camera.move_in(Movement::Right, 2.0);
    assert!((camera.position.x - 2.0 * camera.speed).abs() < 1e-4);
    camera.move_in(Movement::Left, 2.0);
    assert!(camera.position.x.abs() < 1e-4);
}

#[test]
fn should_apply_held_keys_on_update() {
    let mut camera = Camera::default();
    let mut controller = CameraController::new();

    assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
    assert!(!controller.process_keyboard(KeyCode::KeyQ, ElementState::Pressed));
    controller.update(&mut camera, 0.5);
    assert!((camera.position.z + camera.speed * 0.5).abs() < 1e-4);

    controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
    let before = camera.position;
    controller.update(&mut camera, 0.5);
    assert_eq!(camera.position, before);
}

#[test]
fn should_ignore_mouse_motion_unless_looking() {
    let mut camera = Camera::default();
    let mut controller = CameraController::new();
    let yaw = camera.yaw();
    controller.process_mouse(100.0, 100.0);
    controller.update(&mut camera, 0.016);
    assert_eq!(camera.yaw(), yaw);
}

#[test]
fn should_zoom_on_scroll() {
    let mut camera = Camera::default();
    let mut controller = CameraController::new();
    controller.process_scroll(&winit::event::MouseScrollDelta::LineDelta(0.0, 5.0));
    controller.update(&mut camera, 0.016);
    assert_eq!(camera.fov(), ZOOM - 5.0);
    // consumed
    controller.update(&mut camera, 0.016);
    assert_eq!(camera.fov(), ZOOM - 5.0);
}

#[test]
fn should_project_points_in_front_into_clip_volume() {
    let camera = Camera::new((0.0, 0.0, 3.0), Vector3::unit_y(), -90.0, 0.0);
    let projection = Projection::new(800, 600, 0.1, 100.0);
    let mut uniform = CameraUniform::new();
    uniform.update_view_proj(&camera, &projection);

    let view_proj = cgmath::Matrix4::from(uniform.view_proj);
    let clip = view_proj * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5);
    assert!(ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn should_ignore_zero_sized_resize() {
    let mut projection = Projection::new(800, 600, 0.1, 100.0);
    projection.resize(0, 0);
    assert!((projection.aspect() - 800.0 / 600.0).abs() < 1e-6);
    projection.resize(400, 400);
    assert_eq!(projection.aspect(), 1.0);
}
