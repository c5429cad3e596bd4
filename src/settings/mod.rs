//! Grid settings & engine integration
//!
//! Carries the project-wide cell layout (cell width, cell height, elevation
//! of the cell floor) as a Bevy resource and offers conversion helpers bound
//! to that configuration, so call sites don't thread the grid size through
//! every conversion.

use bevy::math::bounding::Aabb3d;
use bevy::math::{Rect, Vec2};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::logging::LoggingPlugin;
use crate::spiral::{SpiralError, SpiralId};
use crate::world;

pub struct SpiralGridPlugin;

impl Plugin for SpiralGridPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(LoggingPlugin).init_resource::<GridSettings>();
        let settings = app.world().resource::<GridSettings>();
        info!(
            grid_size = settings.grid_size,
            cell_height = settings.cell_height,
            "spiral grid ready"
        );
    }
}

/// Project-wide cell layout.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Width of a (square) grid cell in world units.
    pub grid_size: f32,
    /// Vertical extent of a cell, used for 3D bounds.
    pub cell_height: f32,
    /// Distance between Z=0 and the bottom surface of a cell.
    pub cell_elevation: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            grid_size: 150.0,
            cell_height: 300.0,
            cell_elevation: 0.0,
        }
    }
}

impl GridSettings {
    /// Settings with a validated cell width and default vertical extent.
    pub fn new(grid_size: f32) -> Result<Self, SpiralError> {
        world::validate_grid_size(grid_size)?;
        Ok(Self {
            grid_size,
            ..Self::default()
        })
    }

    /// Spiral id of the cell containing a world point.
    pub fn cell_index(&self, point: Vec2) -> Result<SpiralId, SpiralError> {
        world::world_point_to_spiral_id(point, self.grid_size)
    }

    /// World-space center of a cell.
    pub fn cell_center(&self, id: SpiralId) -> Result<Vec2, SpiralError> {
        world::spiral_id_to_center(id, self.grid_size)
    }

    /// 2D world-space bounds of a cell.
    pub fn cell_bounds(&self, id: SpiralId) -> Result<Rect, SpiralError> {
        world::spiral_id_to_bounds(id, self.grid_size)
    }

    /// 3D world-space bounds of a cell, using the configured height and
    /// elevation.
    pub fn cell_bounds_3d(&self, id: SpiralId) -> Result<Aabb3d, SpiralError> {
        world::spiral_id_to_bounds_3d(id, self.grid_size, self.cell_height, self.cell_elevation)
    }
}
