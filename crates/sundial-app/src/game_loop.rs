//! Frame pacing: one driver tick per display interval.
//!
//! The pacer stands in for a display-refresh callback. Waiting for the next
//! frame goes through [`FrameSignal`], so tests and benchmarks can run the
//! loop without sleeping.

use std::time::{Duration, Instant};

use sundial_ephemeris::Ephemeris;
use tracing::{info, warn};

use crate::{AnimationDriver, DriverState, RenderBoundary, TickOutcome};

/// If the loop falls further behind than this, it drops the backlog instead
/// of rendering a burst of frames to catch up.
pub const MAX_FRAME_LAG: Duration = Duration::from_millis(250);

/// Blocks until the next frame should be produced.
pub trait FrameSignal {
    /// Wait for the next frame.
    fn wait_for_frame(&mut self);
}

/// Sleeps until fixed deadlines spaced one frame interval apart.
#[derive(Debug)]
pub struct IntervalSignal {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl IntervalSignal {
    /// Signal at `target_fps` frames per second. Zero is treated as one.
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / target_fps.max(1),
            next_deadline: None,
        }
    }

    /// Time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameSignal for IntervalSignal {
    fn wait_for_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        } else if now - deadline > MAX_FRAME_LAG {
            warn!(
                "Frame pacing fell {:.1}ms behind, skipping ahead",
                (now - deadline).as_secs_f64() * 1000.0
            );
            self.next_deadline = Some(now + self.interval);
            return;
        }
        self.next_deadline = Some(deadline + self.interval);
    }
}

/// Never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl FrameSignal for Immediate {
    fn wait_for_frame(&mut self) {}
}

/// Totals of a [`FramePacer::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks that submitted a frame.
    pub rendered: u64,
    /// Ticks that rendered nothing.
    pub skipped: u64,
}

impl RunStats {
    /// All ticks requested.
    pub fn ticks(&self) -> u64 {
        self.rendered + self.skipped
    }
}

/// Requests one tick per frame signal until the driver stops.
pub struct FramePacer<S> {
    signal: S,
}

impl<S: FrameSignal> FramePacer<S> {
    /// Pacer waiting on `signal` between ticks.
    pub fn new(signal: S) -> Self {
        Self { signal }
    }

    /// Tick `driver` until it stops or `max_frames` ticks were requested.
    ///
    /// With `max_frames == None` the loop only ends when the driver is
    /// stopped through its [`StopHandle`](crate::StopHandle).
    pub fn run<E, R>(
        &mut self,
        driver: &mut AnimationDriver<E, R>,
        max_frames: Option<u64>,
    ) -> RunStats
    where
        E: Ephemeris,
        R: RenderBoundary,
    {
        self.run_with(driver, max_frames, |_| {})
    }

    /// Like [`run`](Self::run), calling `after_tick` between ticks.
    ///
    /// The hook may retune or stop the driver; it runs on the pacing thread.
    pub fn run_with<E, R, F>(
        &mut self,
        driver: &mut AnimationDriver<E, R>,
        max_frames: Option<u64>,
        mut after_tick: F,
    ) -> RunStats
    where
        E: Ephemeris,
        R: RenderBoundary,
        F: FnMut(&mut AnimationDriver<E, R>),
    {
        let mut stats = RunStats::default();
        info!(max_frames = ?max_frames, "Frame pacer started");

        while driver.state() == DriverState::Running
            && max_frames.is_none_or(|max| stats.ticks() < max)
        {
            self.signal.wait_for_frame();
            match driver.tick() {
                TickOutcome::Rendered(_) => stats.rendered += 1,
                TickOutcome::Skipped(_) => stats.skipped += 1,
                TickOutcome::Stopped => break,
            }
            after_tick(driver);
        }

        info!(
            rendered = stats.rendered,
            skipped = stats.skipped,
            "Frame pacer finished"
        );
        stats
    }
}

impl FramePacer<IntervalSignal> {
    /// Pacer sleeping between ticks to hold `target_fps`.
    pub fn with_target_fps(target_fps: u32) -> Self {
        Self::new(IntervalSignal::new(target_fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_fps() {
        let signal = IntervalSignal::new(60);
        let expected = Duration::from_secs_f64(1.0 / 60.0);
        let diff = signal.interval().as_secs_f64() - expected.as_secs_f64();
        assert!(diff.abs() < 1e-6);
    }

    #[test]
    fn test_zero_fps_treated_as_one() {
        assert_eq!(IntervalSignal::new(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_interval_signal_paces_frames() {
        let mut signal = IntervalSignal::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            signal.wait_for_frame();
        }
        // The first frame is immediate, the next three wait 5ms each.
        assert!(start.elapsed() >= Duration::from_millis(14));
    }

    #[test]
    fn test_lagging_signal_resets_deadline() {
        let mut signal = IntervalSignal::new(1000);
        signal.wait_for_frame();
        std::thread::sleep(MAX_FRAME_LAG + Duration::from_millis(20));
        let before = Instant::now();
        signal.wait_for_frame();
        // No sleep: the backlog is dropped.
        assert!(before.elapsed() < Duration::from_millis(100));
        let deadline = signal.next_deadline.unwrap();
        assert!(deadline > before);
    }

    #[test]
    fn test_run_stats_ticks() {
        let stats = RunStats {
            rendered: 3,
            skipped: 2,
        };
        assert_eq!(stats.ticks(), 5);
    }
}
