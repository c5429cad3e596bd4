//! World-space conversions
//!
//! Maps between floating-point world locations and spiral cell ids, given a
//! scalar cell width. Cells are addressed by their lower corner: cell (x, y)
//! covers the half-open world square `[x*g, (x+1)*g) x [y*g, (y+1)*g)` for
//! grid size g, so a point exactly on a boundary belongs to the cell whose
//! lower corner it is. All conversions assume square cells.

use bevy::math::bounding::Aabb3d;
use bevy::math::{IVec2, Rect, Vec2, Vec3};

use crate::spiral::{coord_to_spiral_id, spiral_id_to_coord, SpiralError, SpiralId};

/// Grid sizes must be strictly positive and finite.
pub(crate) fn validate_grid_size(grid_size: f32) -> Result<f32, SpiralError> {
    if grid_size.is_finite() && grid_size > 0.0 {
        Ok(grid_size)
    } else {
        Err(SpiralError::InvalidGridSize { grid_size })
    }
}

/// Grid cell containing a world point.
fn world_to_cell(point: Vec2, grid_size: f32) -> IVec2 {
    IVec2::new(
        (point.x / grid_size).floor() as i32,
        (point.y / grid_size).floor() as i32,
    )
}

/// Convert a 2D world location to the spiral id of the cell containing it.
pub fn world_point_to_spiral_id(point: Vec2, grid_size: f32) -> Result<SpiralId, SpiralError> {
    let grid_size = validate_grid_size(grid_size)?;
    Ok(coord_to_spiral_id(world_to_cell(point, grid_size)))
}

/// Convert a 3D world location to a spiral id. The Z component is ignored,
/// so this is merely a convenience wrapper.
pub fn world_location_to_spiral_id(location: Vec3, grid_size: f32) -> Result<SpiralId, SpiralError> {
    world_point_to_spiral_id(location.truncate(), grid_size)
}

/// Center location of a cell in world space.
pub fn spiral_id_to_center(id: SpiralId, grid_size: f32) -> Result<Vec2, SpiralError> {
    let grid_size = validate_grid_size(grid_size)?;
    let cell = spiral_id_to_coord(id)?;
    Ok((cell.as_vec2() + Vec2::splat(0.5)) * grid_size)
}

/// 2D world-space bounds of a cell.
pub fn spiral_id_to_bounds(id: SpiralId, grid_size: f32) -> Result<Rect, SpiralError> {
    let grid_size = validate_grid_size(grid_size)?;
    let cell = spiral_id_to_coord(id)?;
    let min = cell.as_vec2() * grid_size;
    Ok(Rect::from_corners(min, min + Vec2::splat(grid_size)))
}

/// 3D world-space bounds of a cell. The spiral id only describes the 2D
/// footprint, so the vertical extent is supplied by the caller: the box spans
/// `[elevation, elevation + height]` on Z. A negative `height` yields an
/// inverted interval; callers that care must handle it.
pub fn spiral_id_to_bounds_3d(
    id: SpiralId,
    grid_size: f32,
    height: f32,
    elevation: f32,
) -> Result<Aabb3d, SpiralError> {
    let footprint = spiral_id_to_bounds(id, grid_size)?;
    Ok(Aabb3d {
        min: footprint.min.extend(elevation).into(),
        max: footprint.max.extend(elevation + height).into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3A;

    #[test]
    fn test_world_point_matches_origin_cell() {
        let id = world_point_to_spiral_id(Vec2::ZERO, 150.0).unwrap();
        assert_eq!(id, coord_to_spiral_id(IVec2::ZERO));
    }

    #[test]
    fn test_world_point_floor_assignment() {
        // (149, -1) lies in cell (0, -1) for 150-unit cells.
        let id = world_point_to_spiral_id(Vec2::new(149.0, -1.0), 150.0).unwrap();
        assert_eq!(spiral_id_to_coord(id).unwrap(), IVec2::new(0, -1));

        // Boundary points belong to the cell whose lower corner they are.
        let id = world_point_to_spiral_id(Vec2::new(150.0, 0.0), 150.0).unwrap();
        assert_eq!(spiral_id_to_coord(id).unwrap(), IVec2::new(1, 0));
        let id = world_point_to_spiral_id(Vec2::new(-150.0, 0.0), 150.0).unwrap();
        assert_eq!(spiral_id_to_coord(id).unwrap(), IVec2::new(-1, 0));
    }

    #[test]
    fn test_world_location_ignores_z() {
        let at_ground = world_location_to_spiral_id(Vec3::new(40.0, 310.0, 0.0), 150.0).unwrap();
        let in_the_air =
            world_location_to_spiral_id(Vec3::new(40.0, 310.0, 8000.0), 150.0).unwrap();
        assert_eq!(at_ground, in_the_air);
        assert_eq!(spiral_id_to_coord(at_ground).unwrap(), IVec2::new(0, 2));
    }

    #[test]
    fn test_center_location() {
        assert_eq!(
            spiral_id_to_center(SpiralId::ORIGIN, 150.0).unwrap(),
            Vec2::new(75.0, 75.0)
        );
        // Id 3 is cell (-1, 0).
        assert_eq!(
            spiral_id_to_center(SpiralId::new(3), 150.0).unwrap(),
            Vec2::new(-75.0, 75.0)
        );
    }

    #[test]
    fn test_center_round_trips_to_same_cell() {
        for id in (0..5000u64).map(SpiralId::new) {
            let center = spiral_id_to_center(id, 150.0).unwrap();
            assert_eq!(world_point_to_spiral_id(center, 150.0).unwrap(), id);
        }
    }

    #[test]
    fn test_unit_bounds_of_origin_cell() {
        let bounds = spiral_id_to_bounds(SpiralId::ORIGIN, 1.0).unwrap();
        assert_eq!(bounds, Rect::from_corners(Vec2::ZERO, Vec2::ONE));
    }

    #[test]
    fn test_bounds_cover_cell_footprint() {
        // Id 4 is cell (-1, -1).
        let bounds = spiral_id_to_bounds(SpiralId::new(4), 150.0).unwrap();
        assert_eq!(bounds.min, Vec2::new(-150.0, -150.0));
        assert_eq!(bounds.max, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds_3d_extent() {
        let bounds = spiral_id_to_bounds_3d(SpiralId::ORIGIN, 150.0, 120.0, 30.0).unwrap();
        assert_eq!(bounds.min, Vec3A::new(0.0, 0.0, 30.0));
        assert_eq!(bounds.max, Vec3A::new(150.0, 150.0, 150.0));
    }

    #[test]
    fn test_bounds_3d_negative_height_is_inverted_not_rejected() {
        let bounds = spiral_id_to_bounds_3d(SpiralId::ORIGIN, 150.0, -50.0, 0.0).unwrap();
        assert_eq!(bounds.min.z, 0.0);
        assert_eq!(bounds.max.z, -50.0);
    }

    #[test]
    fn test_invalid_grid_size_rejected() {
        for grid_size in [0.0, -1.0, -150.0, f32::NAN, f32::INFINITY] {
            let err = SpiralError::InvalidGridSize { grid_size };
            let check = |r: Result<(), SpiralError>| match (r, grid_size.is_nan()) {
                (Err(SpiralError::InvalidGridSize { grid_size: g }), true) => assert!(g.is_nan()),
                (result, _) => assert_eq!(result, Err(err)),
            };
            check(world_point_to_spiral_id(Vec2::ZERO, grid_size).map(|_| ()));
            check(world_location_to_spiral_id(Vec3::ZERO, grid_size).map(|_| ()));
            check(spiral_id_to_center(SpiralId::ORIGIN, grid_size).map(|_| ()));
            check(spiral_id_to_bounds(SpiralId::ORIGIN, grid_size).map(|_| ()));
            check(spiral_id_to_bounds_3d(SpiralId::ORIGIN, grid_size, 1.0, 0.0).map(|_| ()));
        }
    }

    #[test]
    fn test_out_of_range_id_propagates() {
        let id = SpiralId::new(u64::MAX);
        assert!(matches!(
            spiral_id_to_center(id, 150.0),
            Err(SpiralError::InvalidIndex { .. })
        ));
        assert!(matches!(
            spiral_id_to_bounds(id, 150.0),
            Err(SpiralError::InvalidIndex { .. })
        ));
    }
}
