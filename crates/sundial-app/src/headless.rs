//! Render boundary that draws nothing and reports progress through tracing.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{Frame, RenderBoundary, Viewport};

/// Digest of the last frame a [`HeadlessRenderer`] received.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRecord {
    /// Frame sequence number.
    pub number: u64,
    /// Simulated instant.
    pub timestamp: DateTime<Utc>,
    /// Sun color as `0xRRGGBB`.
    pub sun_color: u32,
    /// Sun intensity.
    pub sun_intensity: f32,
    /// Moon color as `0xRRGGBB`.
    pub moon_color: u32,
    /// Moon intensity.
    pub moon_intensity: f32,
    /// Number of cubes in the frame.
    pub meshes: usize,
}

/// Counts frames and logs one line per simulated hour.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames_drawn: u64,
    viewport: Option<Viewport>,
    last: Option<FrameRecord>,
    last_logged_hour: Option<i64>,
}

impl HeadlessRenderer {
    /// Renderer with no frames drawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames received so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Surface size from the last resize.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Digest of the last frame.
    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.last.as_ref()
    }
}

impl RenderBoundary for HeadlessRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames_drawn += 1;
        let record = FrameRecord {
            number: frame.number,
            timestamp: frame.timestamp,
            sun_color: frame.sun.color.to_hex(),
            sun_intensity: frame.sun.intensity,
            moon_color: frame.moon.color.to_hex(),
            moon_intensity: frame.moon.intensity,
            meshes: frame.meshes.len(),
        };

        let hour = frame.timestamp.timestamp().div_euclid(3600);
        if self.last_logged_hour != Some(hour) {
            self.last_logged_hour = Some(hour);
            info!(
                frame = record.number,
                time = %record.timestamp.format("%Y-%m-%d %H:%M"),
                sun = %format!("#{:06x}", record.sun_color),
                sun_intensity = record.sun_intensity,
                moon = %format!("#{:06x}", record.moon_color),
                moon_intensity = record.moon_intensity,
                "Sky update"
            );
        }
        self.last = Some(record);
    }

    fn resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "Headless surface resized");
        self.viewport = Some(viewport);
    }
}
