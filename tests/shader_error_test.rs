#![cfg(feature = "integration-tests")]

mod common;

use common::test_utils::headless_device;
use wgpu_lessons::{
    pipelines::basic::RenderState,
    render::{Draw, Render},
    shader::{ComputeShader, Shader, ShaderError, Stage},
};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

const TRIANGLE: &str = r#"
@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    let x = f32(i32(index) - 1) * 0.5;
    let y = f32(i32(index & 1u) * 2 - 1) * 0.5;
    return vec4<f32>(x, y, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.2, 1.0);
}
"#;

const BROKEN_FRAGMENT: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.2;
}
"#;

#[tokio::test]
async fn should_report_compute_compilation_errors() {
    let device = headless_device().await;

    let err = ComputeShader::from_source(&device, "bad", "fn cs_main( {", &[])
        .await
        .expect_err("broken compute source must not compile");

    match err {
        ShaderError::Compilation {
            label,
            stage,
            message,
        } => {
            assert_eq!(label, "bad");
            assert_eq!(stage, Stage::Compute);
            assert!(!message.is_empty());
        }
        other => panic!("expected a compilation error, got {other}"),
    }
}

#[tokio::test]
async fn should_report_broken_fragment_stage() {
    let device = headless_device().await;

    let err = Shader::from_sources(
        &device,
        "broken_fragment",
        TRIANGLE,
        BROKEN_FRAGMENT,
        &[],
        &[],
        &RenderState::opaque(FORMAT),
    )
    .await
    .expect_err("broken fragment source must not compile");

    assert!(
        matches!(
            err,
            ShaderError::Compilation {
                stage: Stage::Fragment,
                ..
            }
        ),
        "{err}"
    );
    assert!(err.to_string().contains("FRAGMENT"));
}

#[tokio::test]
async fn should_fail_to_link_missing_compute_file() {
    let device = headless_device().await;

    let err = ComputeShader::load(&device, "shaders/missing.wgsl", &[])
        .await
        .expect_err("an empty module has no cs_main");

    match err {
        ShaderError::Link { label, .. } => assert_eq!(label, "shaders/missing.wgsl"),
        other => panic!("expected a link error, got {other}"),
    }
}

#[tokio::test]
async fn should_fail_to_link_missing_program_files() {
    let device = headless_device().await;

    let err = Shader::load(
        &device,
        "shaders/missing.vert.wgsl",
        "shaders/missing.frag.wgsl",
        &[],
        &[],
        &RenderState::opaque(FORMAT),
    )
    .await
    .expect_err("empty modules have no entry points");

    assert!(matches!(err, ShaderError::Link { .. }), "{err}");
}

#[tokio::test]
async fn should_link_valid_program() {
    let device = headless_device().await;

    let shader = Shader::from_source(
        &device,
        "triangle",
        TRIANGLE,
        &[],
        &[],
        &RenderState::opaque(FORMAT),
    )
    .await
    .expect("valid program");

    assert_eq!(shader.label, "triangle");
}

#[tokio::test]
async fn should_skip_draws_without_vertices_or_instances() {
    let device = headless_device().await;
    let shader = Shader::from_source(
        &device,
        "triangle",
        TRIANGLE,
        &[],
        &[],
        &RenderState::opaque(FORMAT),
    )
    .await
    .expect("valid program");

    let no_vertices = Draw::new(&shader, 0..0);
    assert!(no_vertices.is_empty());
    let no_instances = Draw::new(&shader, 0..3).instanced(5..5);
    assert!(no_instances.is_empty());

    let render: Render<'_, '_> = Render::Composed(vec![
        no_vertices.into(),
        no_instances.into(),
        Draw::new(&shader, 0..3).into(),
        Draw::new(&shader, 0..3).instanced(0..100).into(),
    ]);
    assert_eq!(render.draw_count(), 2);
}
