//! Face capacity analysis: how many sensors each wall can hold.
//!
//! Capacity uses a diameter-pitch grid: along each in-plane axis, the
//! first sensor center sits `r + gap` from the face edge and each further
//! sensor one diameter along. This is a greedy estimate, not a proof that
//! a compacted grid placed later is overlap-free.

use serde::{Deserialize, Serialize};

use crate::config::{BoxDimensions, SensorSpec};
use crate::walls::{WallDescriptor, WallId, WALLS};

/// Derived geometry for one wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub wall: WallId,
    /// Full face area (mm²).
    pub area: f64,
    /// Face extents minus twice the edge gap, in (u, v) order.
    pub pattern_dims: [f64; 2],
    /// Theoretical maximum sensor count along u and v.
    pub axis_max: [u32; 2],
    /// Product of `axis_max`.
    pub capacity: u64,
}

/// Maximum sensors along one axis given the length left for centers.
///
/// `effective_length` is the face extent minus `2 * (r + gap)`.
pub fn axis_capacity(effective_length: f64, diameter: f64) -> u32 {
    if effective_length < 0.0 {
        0
    } else if effective_length < diameter {
        1
    } else {
        ((effective_length / diameter).floor() as u32).saturating_add(1)
    }
}

/// Geometry of a single wall.
pub fn face_geometry(
    wall: &WallDescriptor,
    dims: &BoxDimensions,
    sensor: &SensorSpec,
) -> FaceGeometry {
    let extents = dims.as_array();
    let face = wall.face_axes.map(|axis| extents[axis]);
    let margin = 2.0 * (sensor.physical_radius() + sensor.edge_gap);
    let effective = face.map(|len| len - margin);

    let axis_max = effective.map(|len| axis_capacity(len, sensor.physical_diameter));
    let capacity = if effective.iter().any(|&len| len < 0.0) {
        0
    } else {
        u64::from(axis_max[0]) * u64::from(axis_max[1])
    };

    FaceGeometry {
        wall: wall.id,
        area: face[0] * face[1],
        pattern_dims: face.map(|len| len - 2.0 * sensor.edge_gap),
        axis_max,
        capacity,
    }
}

/// Geometry for all six walls, in wall enumeration order.
pub fn face_catalog(dims: &BoxDimensions, sensor: &SensorSpec) -> [FaceGeometry; 6] {
    WALLS.each_ref().map(|wall| face_geometry(wall, dims, sensor))
}

/// Sum of all face areas.
pub fn total_wall_area(faces: &[FaceGeometry]) -> f64 {
    faces.iter().map(|f| f.area).sum()
}

/// Sum of all face capacities, saturating at `u64::MAX`.
pub fn max_possible(faces: &[FaceGeometry]) -> u64 {
    faces
        .iter()
        .fold(0u64, |total, f| total.saturating_add(f.capacity))
}
