//! Layout generation: the full placement pipeline.
//!
//! ```text
//! LayoutConfig ──▶ face_catalog ──▶ target_count ──▶ allocate
//!                                                       │
//!                       PmtInfo + Summary ◀── emit ◀── pack_face (×6)
//! ```
//!
//! ```
//! use pmtlayout_logic::config::{BoxDimensions, LayoutConfig, SensorSpec};
//! use pmtlayout_logic::placement::generate_layout;
//!
//! let config = LayoutConfig {
//!     box_dims: BoxDimensions::new(1000.0, 1000.0, 1000.0).unwrap(),
//!     sensor: SensorSpec {
//!         physical_diameter: 100.0,
//!         active_diameter: 80.0,
//!         standoff: 0.0,
//!         edge_gap: 0.0,
//!     },
//!     desired_coverage: 0.10,
//! };
//! let layout = generate_layout(&config).unwrap();
//! assert_eq!(layout.summary.total_placed, 120);
//! assert_eq!(layout.pmt_info.len(), 120);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocation::allocate;
use crate::config::{validate_config, ConfigError, LayoutConfig};
use crate::coverage::{achieved_coverage, active_area, target_count};
use crate::diagnostics::Diagnostic;
use crate::faces::{face_catalog, max_possible, total_wall_area};
use crate::grid::{pack_face, GridShape};
use crate::pmtinfo::{PlacedSensor, PmtInfo, PmtInfoBuilder, ACTIVE_PMT_TYPE};
use crate::walls::{WallDescriptor, WallId};

/// Fatal layout error. Only invalid input is fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Per-wall outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallAllocation {
    pub wall: WallId,
    pub allocated: u64,
    pub capacity: u64,
    /// Grid used, if anything was placed.
    pub grid: Option<GridShape>,
}

/// Placement summary for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_placed: u64,
    pub desired_coverage: f64,
    pub achieved_coverage: f64,
    pub active_diameter: f64,
    pub physical_diameter: f64,
    pub standoff: f64,
    pub edge_gap: f64,
    /// Sensors the coverage target asked for.
    pub target_count: u64,
    /// Sum of all wall capacities.
    pub max_possible: u64,
    pub total_wall_area: f64,
    pub active_area: f64,
    pub walls: Vec<WallAllocation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Summary {
    /// Allocated count for one wall.
    pub fn allocated_on(&self, wall: WallId) -> u64 {
        self.walls
            .iter()
            .find(|w| w.wall == wall)
            .map_or(0, |w| w.allocated)
    }

    pub fn truncated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::TargetTruncated { .. }))
    }
}

/// A generated layout: the sensor table plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub pmt_info: PmtInfo,
    pub summary: Summary,
}

/// Position of a sensor centered at `(u, v)` on `wall`.
pub fn sensor_position(
    wall: &WallDescriptor,
    uv: [f64; 2],
    half_extents: [f64; 3],
    center_offset: f64,
) -> [f64; 3] {
    let sign = wall.sign_f64();
    let mut position = [0.0; 3];
    position[wall.fixed_axis] = sign * half_extents[wall.fixed_axis] - sign * center_offset;
    position[wall.face_axes[0]] = uv[0];
    position[wall.face_axes[1]] = uv[1];
    position
}

/// Validate `config` and generate its layout.
pub fn generate_layout(config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let errors = validate_config(config);
    if !errors.is_empty() {
        return Err(LayoutError::InvalidConfig(errors));
    }
    Ok(build_layout(config))
}

/// Generate a layout without validating `config` first.
///
/// Degenerate geometry yields an empty layout with diagnostics rather than
/// an error; callers must still supply positive dimensions.
pub fn build_layout(config: &LayoutConfig) -> Layout {
    let sensor = &config.sensor;
    let faces = face_catalog(&config.box_dims, sensor);

    let wall_area = total_wall_area(&faces);
    let sensor_area = active_area(sensor.active_diameter);
    let target = target_count(config.desired_coverage, wall_area, sensor_area);

    let capacities = faces.map(|f| f.capacity);
    let (plan, mut diagnostics) = allocate(target, &capacities, config.desired_coverage);

    let half_extents = config.box_dims.half_extents();
    let center_offset = sensor.center_offset();
    let mut table = PmtInfoBuilder::with_capacity(usize::try_from(plan.total()).unwrap_or(0));
    let mut walls = Vec::with_capacity(faces.len());

    for (face, &allocated) in faces.iter().zip(&plan.counts) {
        let descriptor = face.wall.descriptor();
        let (packed, wall_diagnostics) = pack_face(face, allocated, sensor.physical_diameter);
        diagnostics.extend(wall_diagnostics);

        let grid = packed.map(|packed| {
            for uv in packed.centers {
                table.push(PlacedSensor {
                    position: sensor_position(descriptor, uv, half_extents, center_offset),
                    direction: descriptor.normal(),
                    sensor_type: ACTIVE_PMT_TYPE,
                });
            }
            packed.shape
        });

        walls.push(WallAllocation {
            wall: face.wall,
            allocated,
            capacity: face.capacity,
            grid,
        });
    }

    let pmt_info = table.finish();
    let total_placed = pmt_info.len() as u64;

    let summary = Summary {
        total_placed,
        desired_coverage: config.desired_coverage,
        achieved_coverage: achieved_coverage(total_placed, sensor_area, wall_area),
        active_diameter: sensor.active_diameter,
        physical_diameter: sensor.physical_diameter,
        standoff: sensor.standoff,
        edge_gap: sensor.edge_gap,
        target_count: target,
        max_possible: max_possible(&faces),
        total_wall_area: wall_area,
        active_area: sensor_area,
        walls,
        diagnostics,
    };

    Layout { pmt_info, summary }
}
