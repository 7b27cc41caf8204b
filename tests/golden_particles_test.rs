#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_draw_white_particles() {
    use crate::common::test_utils::{golden_image_test, rgba};
    use wgpu_lessons::{flow::ImageTestResult, lessons::particles::Particles};

    golden_image_test(
        Particles::settings(),
        Particles::new,
        Box::new(|ctx, frame, texture| {
            if frame < 2 {
                return Ok(ImageTestResult::Waiting);
            }
            let white = texture
                .pixels()
                .filter(|pixel| rgba(ctx, pixel) == [255, 255, 255, 255])
                .count();
            assert!(white > 0);
            Ok(ImageTestResult::Passed)
        }),
    );
}
