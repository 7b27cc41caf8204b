use wgpu_lessons::{flow::Out, render::Render};

#[test]
fn should_default_to_empty_output() {
    assert!(matches!(Out::default(), Out::Empty));
    assert_eq!(format!("{:?}", Out::Exit), "Exit");
    let configure = Out::Configure(Box::new(|ctx| ctx.clear_colour = wgpu::Color::BLACK));
    assert_eq!(format!("{configure:?}"), "Configure(|&mut Context| {...})");
}

#[test]
fn should_count_no_draws_without_draw_calls() {
    let nothing: Render<'_, '_> = Render::None;
    assert_eq!(nothing.draw_count(), 0);

    let custom: Render<'_, '_> = Render::Custom(Box::new(|_, _| {}));
    assert_eq!(custom.draw_count(), 0);

    let composed: Render<'_, '_> = Render::Composed(vec![
        Render::None,
        Render::Composed(vec![Render::None]),
        Render::Custom(Box::new(|_, _| {})),
    ]);
    assert_eq!(composed.draw_count(), 0);
}
