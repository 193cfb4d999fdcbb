//! Sundial preview application: the animation driver and its collaborators.
//!
//! The driver advances a simulated clock and a camera orbit every frame,
//! computes sun and moon lighting through an [`Ephemeris`](sundial_ephemeris::Ephemeris),
//! and hands the result to a [`RenderBoundary`].

mod camera;
mod clock;
pub mod driver;
mod error;
pub mod game_loop;
mod headless;
mod orbit;
pub mod platform;
mod reload;
mod render;
mod session;

pub use camera::{Projection, Viewport};
pub use clock::{ClockError, SimulatedClock};
pub use driver::{
    AnimationDriver, DriverError, DriverSettings, DriverState, FrameSummary, SceneContext,
    SkipReason, StopHandle, TickOutcome,
};
pub use error::AppError;
pub use game_loop::{FramePacer, FrameSignal, Immediate, IntervalSignal, RunStats};
pub use headless::{FrameRecord, HeadlessRenderer};
pub use orbit::{CameraOrbit, CameraPose, ORBIT_RADIUS_FACTOR};
pub use platform::{PlatformDirs, PlatformError};
pub use reload::{ConfigWatcher, apply_config};
pub use render::{Frame, InstanceRaw, MeshInstance, RenderBoundary};
pub use session::Session;
