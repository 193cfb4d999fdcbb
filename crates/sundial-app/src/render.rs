//! The seam between the animation driver and whatever draws the scene.
//!
//! The driver never issues draw calls itself. Each rendered tick it builds a
//! [`Frame`] and hands it to a [`RenderBoundary`]; a GPU renderer, a test
//! recorder or the [`HeadlessRenderer`](crate::HeadlessRenderer) sits on
//! the other side.

use bytemuck::{Pod, Zeroable};
use chrono::{DateTime, Utc};
use glam::Vec3;
use sundial_lighting::{DirectionalLight, Rgb};
use sundial_terrain::{TerrainBlock, to_visual};

use crate::{CameraPose, Projection, Viewport};

/// One cube in the static scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshInstance {
    /// Cube center in scene units.
    pub world_position: Vec3,
    /// Surface color.
    pub color: Rgb,
    /// Cube edge length.
    pub cube_size: f32,
}

impl MeshInstance {
    /// Cube for a generated terrain block.
    pub fn from_block(block: &TerrainBlock, cube_size: f32) -> Self {
        let visual = to_visual(block, cube_size);
        Self {
            world_position: visual.world_position,
            color: visual.color,
            cube_size,
        }
    }

    /// Per-instance vertex data.
    pub fn to_raw(&self) -> InstanceRaw {
        let p = self.world_position;
        let c = self.color.to_vec3();
        InstanceRaw {
            position_size: [p.x, p.y, p.z, self.cube_size],
            color: [c.x, c.y, c.z, 1.0],
        }
    }
}

/// Instance buffer layout, 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    /// xyz = cube center, w = edge length.
    pub position_size: [f32; 4],
    /// rgb in `[0, 1]`, a = 1.
    pub color: [f32; 4],
}

/// Everything needed to draw one tick.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Sequence number of this frame, starting at 1.
    pub number: u64,
    /// Simulated instant the lights were computed for.
    pub timestamp: DateTime<Utc>,
    /// Camera placement.
    pub camera: CameraPose,
    /// Camera projection.
    pub projection: Projection,
    /// Sun light.
    pub sun: DirectionalLight,
    /// Moon light.
    pub moon: DirectionalLight,
    /// Static terrain cubes.
    pub meshes: &'a [MeshInstance],
}

/// Receives frames from the driver.
pub trait RenderBoundary {
    /// Draw one frame.
    fn draw(&mut self, frame: &Frame<'_>);

    /// The drawable surface changed size. Never called with a zero dimension.
    fn resize(&mut self, viewport: Viewport);
}
