#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_show_cube_in_front_of_camera() {
    use crate::common::test_utils::{close_to, expected_pixel, golden_image_test, rgba};
    use wgpu_lessons::{flow::ImageTestResult, lessons::camera::CameraLesson};

    golden_image_test(
        CameraLesson::settings(),
        CameraLesson::new,
        Box::new(|ctx, frame, texture| {
            if frame < 2 {
                return Ok(ImageTestResult::Waiting);
            }
            let (w, h) = texture.dimensions();
            let clear = expected_pixel(ctx, ctx.clear_colour);
            // The first cube sits at the origin, straight ahead of the camera
            let centre = rgba(ctx, texture.get_pixel(w / 2, h / 2));
            assert!(!close_to(centre, clear), "nothing drawn at the centre");
            Ok(ImageTestResult::Passed)
        }),
    );
}
