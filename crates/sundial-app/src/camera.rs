//! Perspective projection and viewport size.

use glam::Mat4;

/// Drawable surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// `None` when either dimension is zero (minimized window, collapsed container).
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Projection {
    /// Update the aspect ratio to match `viewport`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect_ratio = viewport.aspect_ratio();
    }

    /// Right-handed perspective matrix, depth in `[0, 1]`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 70.0,
            aspect_ratio: 16.0 / 9.0,
            near: 1.0,
            far: 10_000.0,
        }
    }
}
