//! Per-lesson configuration.
//!
//! Lessons take no command line flags and read no config files. Everything a
//! lesson can tune about its window and render loop is collected in
//! [`Settings`], built in code with the `with_*` methods:
//!
//! ```no_run
//! use wgpu_lessons::settings::Settings;
//!
//! let settings = Settings::default()
//!     .with_title("Particles")
//!     .with_size(800, 800)
//!     .with_vsync(false);
//! ```

/// Window and render loop configuration for a single lesson.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Present with `Fifo` when set, otherwise prefer an uncapped present mode.
    pub vsync: bool,
    pub clear_colour: wgpu::Color,
    /// Log the frame rate every `n` frames. `0` disables the report.
    pub fps_log_interval: u32,
    /// `env_logger` filter string. Falls back to `RUST_LOG`, then `info`.
    pub log_filter: Option<String>,
}

impl Settings {
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
    pub const DEFAULT_CLEAR_COLOUR: wgpu::Color = wgpu::Color {
        r: 0.2,
        g: 0.3,
        b: 0.3,
        a: 1.0,
    };

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_clear_colour(mut self, clear_colour: wgpu::Color) -> Self {
        self.clear_colour = clear_colour;
        self
    }

    pub fn with_fps_log_interval(mut self, frames: u32) -> Self {
        self.fps_log_interval = frames;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "LearnWGPU".to_string(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            vsync: true,
            clear_colour: Self::DEFAULT_CLEAR_COLOUR,
            fps_log_interval: 500,
            log_filter: None,
        }
    }
}
