use crate::{
    flow::{self, Lesson, LessonConstructor},
    render::Render,
    settings::Settings,
};

pub const CLEAR_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.0,
    b: 0.5,
    a: 1.0,
};

/// Opens a window and clears it every frame. Nothing is drawn.
#[derive(Debug, Default)]
pub struct HelloWindow;

impl HelloWindow {
    pub fn settings() -> Settings {
        Settings::default()
            .with_title("Hello Window")
            .with_clear_colour(CLEAR_COLOUR)
    }

    pub fn constructor() -> LessonConstructor {
        flow::constructor(|_| async { Ok(HelloWindow) })
    }
}

impl Lesson for HelloWindow {
    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Render::None
    }
}
