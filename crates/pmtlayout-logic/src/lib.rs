//! PMT placement logic for box-shaped detectors.
//!
//! Given box dimensions, a sensor spec, and a target photocoverage, this
//! crate lays out circular PMTs on the six interior walls and returns their
//! positions and inward-facing orientations. Everything here is pure and
//! deterministic: functions take plain data and return results, so the
//! same code serves the CLI, tests, and any other front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocation`] | Largest-remainder split of the sensor count across walls |
//! | [`config`] | Box dimensions, sensor spec, coverage target, validation |
//! | [`coverage`] | Coverage fraction ↔ sensor count |
//! | [`diagnostics`] | Non-fatal advisories returned with a layout |
//! | [`faces`] | Per-wall area, pattern region, and capacity |
//! | [`grid`] | Near-square grid compaction and cell centers |
//! | [`placement`] | End-to-end pipeline, 3D positions, summary |
//! | [`pmtinfo`] | Parallel-array sensor table and its file format |
//! | [`viewer`] | Standalone three.js HTML page for a layout |
//! | [`walls`] | The six wall descriptors (axes, sign, inward normal) |

pub mod allocation;
pub mod config;
pub mod coverage;
pub mod diagnostics;
pub mod faces;
pub mod grid;
pub mod placement;
pub mod pmtinfo;
pub mod viewer;
pub mod walls;

pub use config::{BoxDimensions, ConfigError, LayoutConfig, SensorSpec};
pub use placement::{generate_layout, Layout, LayoutError, Summary};
