//! Per-wall grid packing.
//!
//! A wall's allocated sensors are laid out on a rows × cols grid of equal
//! cells spanning the pattern region, with each sensor at a cell center.
//! Rows run along the wall's u axis and columns along v. Cells are filled
//! row-major, so only the last row can be partially empty.
//!
//! ```
//! use pmtlayout_logic::grid::compact_grid;
//!
//! // 10 sensors on a square face: neither 4×2 nor 3×3 holds 10
//! assert_eq!(compact_grid(10, 1000.0, 1000.0), (4, 3));
//! ```

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::faces::FaceGeometry;

/// Slack allowed when comparing a cell pitch against the sensor diameter.
const PITCH_TOLERANCE_MM: f64 = 1e-3;

/// Chosen grid for one wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridShape {
    /// Cells along the wall's u axis.
    pub rows: u64,
    /// Cells along the wall's v axis.
    pub cols: u64,
    /// Cell pitch along u and v.
    pub spacing: [f64; 2],
}

impl GridShape {
    pub fn cells(&self) -> u64 {
        self.rows.saturating_mul(self.cols)
    }
}

/// A packed wall: its grid plus the occupied cell centers in (u, v).
#[derive(Debug, Clone, PartialEq)]
pub struct PackedFace {
    pub shape: GridShape,
    pub centers: Vec<[f64; 2]>,
}

/// Smallest near-square grid holding `n` cells on a `d1 × d2` region.
///
/// Seeds rows from the region's aspect ratio, then drops whole columns
/// (preferred) or rows while the grid still holds `n`.
pub fn compact_grid(n: u64, d1: f64, d2: f64) -> (u64, u64) {
    let mut rows = ((n as f64 * d1 / d2).sqrt().ceil() as u64).max(1);
    let mut cols = n.div_ceil(rows).max(1);

    loop {
        if cols > 1 && rows.saturating_mul(cols - 1) >= n {
            cols -= 1;
        } else if rows > 1 && (rows - 1).saturating_mul(cols) >= n {
            rows -= 1;
        } else {
            break;
        }
    }
    (rows, cols)
}

/// Choose a grid for `face` holding `allocated` sensors.
///
/// Returns `None` when nothing can be placed on this wall.
pub fn grid_shape(face: &FaceGeometry, allocated: u64) -> Option<(u64, u64)> {
    if allocated == 0 {
        return None;
    }
    let [d1, d2] = face.pattern_dims;
    let [max1, max2] = face.axis_max;

    if allocated == face.capacity && max1 > 0 && max2 > 0 {
        return Some((u64::from(max1), u64::from(max2)));
    }
    match (d1 > 0.0, d2 > 0.0) {
        (true, true) => Some(compact_grid(allocated, d1, d2)),
        // Degenerate strip: everything along the one valid axis
        (false, true) => Some((1, allocated)),
        (true, false) => Some((allocated, 1)),
        (false, false) => None,
    }
}

/// Center of cell (row, col) on a `d1 × d2` region centered at the origin.
pub fn cell_center(row: u64, col: u64, pattern_dims: [f64; 2], spacing: [f64; 2]) -> [f64; 2] {
    [
        -pattern_dims[0] / 2.0 + spacing[0] / 2.0 + row as f64 * spacing[0],
        -pattern_dims[1] / 2.0 + spacing[1] / 2.0 + col as f64 * spacing[1],
    ]
}

/// Pack `allocated` sensors onto `face`.
///
/// Returns the packed cells (or `None` if the wall is skipped) and any
/// advisories raised.
pub fn pack_face(
    face: &FaceGeometry,
    allocated: u64,
    physical_diameter: f64,
) -> (Option<PackedFace>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    if allocated == 0 {
        return (None, diagnostics);
    }

    let pattern = face.pattern_dims;
    let skip = pattern.iter().any(|&d| d < 0.0);
    let shape = if skip { None } else { grid_shape(face, allocated) };
    let Some((rows, cols)) = shape else {
        diagnostics.push(Diagnostic::DegeneratePattern {
            wall: face.wall,
            allocated,
            pattern_dims: pattern,
        });
        return (None, diagnostics);
    };

    let spacing = [pattern[0] / rows as f64, pattern[1] / cols as f64];
    let shape = GridShape {
        rows,
        cols,
        spacing,
    };

    if allocated > 1 && shape.cells() > allocated {
        for (axis, &pitch) in spacing.iter().enumerate() {
            if pitch < physical_diameter - PITCH_TOLERANCE_MM {
                diagnostics.push(Diagnostic::TightPitch {
                    wall: face.wall,
                    axis: axis as u8,
                    spacing: pitch,
                    diameter: physical_diameter,
                    cells: if axis == 0 { rows } else { cols },
                });
            }
        }
    }

    let centers: Vec<[f64; 2]> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .take(usize::try_from(allocated).unwrap_or(usize::MAX))
        .map(|(r, c)| cell_center(r, c, pattern, spacing))
        .collect();

    log::debug!(
        "{}: {} sensors on {}×{} grid, pitch {:.1}×{:.1} mm",
        face.wall,
        centers.len(),
        rows,
        cols,
        spacing[0],
        spacing[1]
    );

    (Some(PackedFace { shape, centers }), diagnostics)
}
