#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_cover_frame_with_computed_texture() {
    use crate::common::test_utils::{golden_image_test, rgba};
    use wgpu_lessons::{flow::ImageTestResult, lessons::compute_texture::ComputeTexture};

    golden_image_test(
        ComputeTexture::settings(),
        ComputeTexture::new,
        Box::new(|ctx, frame, texture| {
            if frame == 0 {
                return Ok(ImageTestResult::Waiting);
            }
            // The compute shader never writes blue and the quad covers
            // everything, so no trace of the clear colour's blue is left.
            for pixel in texture.pixels() {
                let [_, _, b, a] = rgba(ctx, pixel);
                assert!(b <= 1, "blue {b} left in {:?}", rgba(ctx, pixel));
                assert_eq!(a, 255);
            }
            Ok(ImageTestResult::Passed)
        }),
    );
}
