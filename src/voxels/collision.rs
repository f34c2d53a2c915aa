//! # Collision
//!
//! Axis-aligned box collision against the block grid. A moving body is
//! described by a box relative to its position; the resolver finds the first
//! solid cell overlapping that box and pushes the body out along the axis of
//! least penetration.

use cgmath::{Point3, Vector3};

use super::block::{BlockId, AIR};

/// Cells within this distance of the box are considered.
const SEARCH_MARGIN: f32 = 0.1;

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// A box of the given size standing on the origin, centred horizontally.
    pub fn standing(width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Aabb {
            min: Point3::new(-half, 0.0, -half),
            max: Point3::new(half, height, half),
        }
    }

    /// The box of the unit cell at `(x, y, z)`.
    pub fn cell(x: i32, y: i32, z: i32) -> Self {
        let min = Point3::new(x as f32, y as f32, z as f32);
        Aabb {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// This box moved by `offset`.
    pub fn translate(&self, offset: Vector3<f32>) -> Self {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Whether the boxes overlap with positive volume. Boxes that only
    /// share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// Outcome of a collision check.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionResult {
    /// Whether a solid cell overlapped the box.
    pub collision: bool,
    /// The position after pushing the body out. Equal to the input when
    /// there was no collision.
    pub corrected_position: Point3<f32>,
    /// Whether the body was pushed up onto a block.
    pub on_ground: bool,
}

/// Resolves `bounds` placed at `position` against the cells reported by `block_at`.
///
/// Cells are visited bottom-up and only the first overlapping solid cell is
/// resolved; callers run the check every frame, which settles the rest. A
/// body whose box starts below the cell is pushed down, otherwise up (which
/// sets `on_ground`); the same rule applies on the horizontal axes.
pub fn resolve<F>(block_at: F, position: Point3<f32>, bounds: &Aabb) -> CollisionResult
where
    F: Fn(i32, i32, i32) -> BlockId,
{
    let offset = Vector3::new(position.x, position.y, position.z);
    let test = bounds.translate(offset);

    let min_x = (test.min.x - SEARCH_MARGIN).floor() as i32;
    let min_y = (test.min.y - SEARCH_MARGIN).floor() as i32;
    let min_z = (test.min.z - SEARCH_MARGIN).floor() as i32;
    let max_x = (test.max.x + SEARCH_MARGIN).ceil() as i32;
    let max_y = (test.max.y + SEARCH_MARGIN).ceil() as i32;
    let max_z = (test.max.z + SEARCH_MARGIN).ceil() as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                if block_at(x, y, z) == AIR {
                    continue;
                }

                let cell = Aabb::cell(x, y, z);
                if !test.intersects(&cell) {
                    continue;
                }

                let penetration_x = (test.max.x - cell.min.x).min(cell.max.x - test.min.x);
                let penetration_y = (test.max.y - cell.min.y).min(cell.max.y - test.min.y);
                let penetration_z = (test.max.z - cell.min.z).min(cell.max.z - test.min.z);
                let least = penetration_x.min(penetration_y).min(penetration_z);

                let mut corrected = position;
                let mut on_ground = false;

                if least == penetration_y {
                    if test.min.y < cell.min.y {
                        corrected.y = cell.min.y - bounds.max.y;
                    } else {
                        corrected.y = cell.max.y - bounds.min.y;
                        on_ground = true;
                    }
                } else if least == penetration_x {
                    if test.min.x < cell.min.x {
                        corrected.x = cell.min.x - bounds.max.x;
                    } else {
                        corrected.x = cell.max.x - bounds.min.x;
                    }
                } else if test.min.z < cell.min.z {
                    corrected.z = cell.min.z - bounds.max.z;
                } else {
                    corrected.z = cell.max.z - bounds.min.z;
                }

                return CollisionResult {
                    collision: true,
                    corrected_position: corrected,
                    on_ground,
                };
            }
        }
    }

    CollisionResult {
        collision: false,
        corrected_position: position,
        on_ground: false,
    }
}
