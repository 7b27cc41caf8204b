//! Frame timing.
//!
//! [`FrameTimer`] is ticked once per presented frame. It reports the time
//! since the loop started (what the shaders animate with), the delta since the
//! previous frame and, every `n` frames, the current frame rate.

use std::time::{Duration, Instant};

/// Snapshot handed to lessons every frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameTime {
    /// Seconds since the render loop started.
    pub elapsed: f32,
    pub dt: Duration,
    pub frame_index: u64,
}

impl FrameTime {
    pub fn dt_secs(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}

#[derive(Debug, Clone)]
pub struct FrameTimer {
    start: Instant,
    last: Instant,
    frame_index: u64,
    frames_since_report: u32,
    report_interval: u32,
}

impl FrameTimer {
    pub fn new(report_interval: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            frames_since_report: 0,
            report_interval,
        }
    }

    /// Advance by one frame using the wall clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance by one frame as if it was `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let time = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            dt,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);

        if let Some(fps) = self.fps_report(dt) {
            log::info!("FPS: {:.1}", fps);
        }
        time
    }

    /// Returns the frame rate once every `report_interval` frames.
    pub fn fps_report(&mut self, dt: Duration) -> Option<f32> {
        if self.report_interval == 0 {
            return None;
        }
        self.frames_since_report += 1;
        if self.frames_since_report < self.report_interval {
            return None;
        }
        self.frames_since_report = 0;
        let secs = dt.as_secs_f32();
        (secs > 0.0).then(|| 1.0 / secs)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(500)
    }
}
