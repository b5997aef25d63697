//! Advisory diagnostics raised while building a layout.
//!
//! None of these stop layout generation. They are returned alongside the
//! result so the caller can log, display, or ignore them.

use serde::{Deserialize, Serialize};

use crate::walls::WallId;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// A non-fatal event recorded during layout generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Every wall has zero capacity.
    NoPlacementPossible,
    /// The coverage target asked for more sensors than fit.
    TargetTruncated {
        desired_coverage: f64,
        target_count: u64,
        max_possible: u64,
    },
    /// A compacted grid pitch is narrower than the sensor diameter, so
    /// neighbouring sensors may overlap.
    TightPitch {
        wall: WallId,
        /// 0 for the wall's u axis, 1 for v.
        axis: u8,
        spacing: f64,
        diameter: f64,
        cells: u64,
    },
    /// A wall was allocated sensors but its pattern region is degenerate.
    DegeneratePattern {
        wall: WallId,
        allocated: u64,
        pattern_dims: [f64; 2],
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::TightPitch { .. } => Severity::Info,
            Self::NoPlacementPossible
            | Self::TargetTruncated { .. }
            | Self::DegeneratePattern { .. } => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlacementPossible => {
                write!(f, "no PMTs can be placed with the given geometric constraints")
            }
            Self::TargetTruncated {
                desired_coverage,
                target_count,
                max_possible,
            } => write!(
                f,
                "desired photocoverage {:.2}% requires {} PMTs, only {} fit; placing max possible",
                desired_coverage * 100.0,
                target_count,
                max_possible
            ),
            Self::TightPitch {
                wall,
                axis,
                spacing,
                diameter,
                cells,
            } => write!(
                f,
                "{}: cell spacing along axis {} ({:.2} mm) is tight for PMT diameter {:.2} mm with {} cells",
                wall, axis, spacing, diameter, cells
            ),
            Self::DegeneratePattern {
                wall,
                allocated,
                pattern_dims,
            } => write!(
                f,
                "{}: pattern region {:.2}×{:.2} mm cannot hold {} allocated PMTs; wall skipped",
                wall, pattern_dims[0], pattern_dims[1], allocated
            ),
        }
    }
}
