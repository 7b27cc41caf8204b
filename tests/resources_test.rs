use std::path::PathBuf;

use wgpu_lessons::resources::{ASSETS_ENV, asset_path, assets_root};

// Kept in one test: the environment is shared by all tests of this binary.
#[test]
fn should_resolve_assets_root_from_environment() {
    unsafe { std::env::remove_var(ASSETS_ENV) };
    assert_eq!(assets_root(), PathBuf::from("./assets"));
    assert_eq!(
        asset_path("shaders/particle.wgsl"),
        PathBuf::from("./assets/shaders/particle.wgsl")
    );

    unsafe { std::env::set_var(ASSETS_ENV, "/tmp/lesson-assets") };
    assert_eq!(assets_root(), PathBuf::from("/tmp/lesson-assets"));
    assert_eq!(
        asset_path("textures/container.jpg"),
        PathBuf::from("/tmp/lesson-assets/textures/container.jpg")
    );

    unsafe { std::env::remove_var(ASSETS_ENV) };
}
