//! # Raycast
//!
//! Fixed-step ray marching against block occupancy. The ray is sampled every
//! `step` world units from its origin; the first sample whose cell holds a
//! non-air block is the hit.
//!
//! The struck face is found by intersecting the ray with the hit cell's
//! three slabs: the axis whose slab is entered last is the face the ray came
//! through. The reported distance is that entry distance, so it does not
//! depend on where inside the cell the sample happened to land.

use cgmath::{InnerSpace, Point3, Vector3};

use super::block::{block_side::BlockSide, BlockId, AIR};

/// Upper bound on samples per ray, whatever the distance and step.
pub const MAX_SAMPLES: u32 = 1 << 20;

/// A half-line in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Point3<f32>,
    /// Direction. Need not be normalised.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray { origin, direction }
    }
}

/// The first block struck by a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastHit {
    /// World coordinates of the struck block.
    pub block: Point3<i32>,
    /// Id of the struck block.
    pub block_id: BlockId,
    /// The face the ray entered through.
    pub face: BlockSide,
    /// Unit normal of that face.
    pub normal: Vector3<i32>,
    /// Distance from the origin to the face along the ray.
    pub distance: f32,
}

impl RaycastHit {
    /// The cell in front of the struck face, where a placed block would go.
    pub fn adjacent(&self) -> Point3<i32> {
        self.block + self.normal
    }
}

/// Marches `ray` through the cells reported by `block_at`.
///
/// # Arguments
/// * `block_at` - Block id at world cell `(x, y, z)`
/// * `ray` - The ray; a zero or non-finite direction never hits
/// * `max_distance` - Samples are taken strictly below this distance
/// * `step` - Distance between samples
///
/// At most [`MAX_SAMPLES`] samples are taken, so an infinite `max_distance`
/// or a vanishing `step` still terminates.
pub fn march<F>(block_at: F, ray: &Ray, max_distance: f32, step: f32) -> Option<RaycastHit>
where
    F: Fn(i32, i32, i32) -> BlockId,
{
    let length = ray.direction.magnitude();
    if !(length.is_finite() && length > 0.0) || !(step > 0.0) {
        return None;
    }
    let direction = ray.direction / length;

    // One spare sample absorbs rounding in the quotient; the distance check
    // below still stops at `max_distance`.
    let samples = (max_distance / step).ceil() + 1.0;
    if !(samples > 1.0) {
        return None;
    }
    let samples = samples.min(MAX_SAMPLES as f32) as u32;

    for sample in 0..samples {
        let distance = sample as f32 * step;
        if !(distance < max_distance) {
            return None;
        }

        let point = ray.origin + direction * distance;
        let cell = Point3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        );

        let block_id = block_at(cell.x, cell.y, cell.z);
        if block_id != AIR {
            return struck_face(ray.origin, direction, cell).map(|(face, distance)| RaycastHit {
                block: cell,
                block_id,
                face,
                normal: face.normal(),
                distance,
            });
        }
    }

    None
}

/// Finds the face of `cell` through which a ray from `origin` along the unit
/// `direction` enters, and the entry distance (zero when the origin is inside).
fn struck_face(origin: Point3<f32>, direction: Vector3<f32>, cell: Point3<i32>) -> Option<(BlockSide, f32)> {
    let mut entry_axis = None;
    let mut entry = f32::NEG_INFINITY;

    for axis in 0..3 {
        if direction[axis] == 0.0 {
            continue;
        }
        let low = (cell[axis] as f32 - origin[axis]) / direction[axis];
        let high = (cell[axis] as f32 + 1.0 - origin[axis]) / direction[axis];
        let enter = low.min(high);
        if enter > entry {
            entry = enter;
            entry_axis = Some(axis);
        }
    }

    let axis = entry_axis?;
    // The ray enters through the face opposite to its travel on that axis.
    let face = BlockSide::from_axis(axis, direction[axis] < 0.0)?;
    Some((face, entry.max(0.0)))
}
