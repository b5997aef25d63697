//! Integration tests for the full layout pipeline.
//!
//! Exercises: LayoutConfig → face catalog → coverage target → allocation
//! → grid packing → PmtInfo + Summary
//!
//! All tests are pure logic with no file output.

use approx::assert_relative_eq;
use pmtlayout_logic::config::{BoxDimensions, LayoutConfig, SensorSpec};
use pmtlayout_logic::coverage::{active_area, target_count};
use pmtlayout_logic::diagnostics::Diagnostic;
use pmtlayout_logic::faces::face_catalog;
use pmtlayout_logic::placement::{generate_layout, Layout};
use pmtlayout_logic::walls::{WallId, WALLS};

// ── Helpers ────────────────────────────────────────────────────────────

fn config(dims: [f64; 3], coverage: f64) -> LayoutConfig {
    LayoutConfig {
        box_dims: BoxDimensions::new(dims[0], dims[1], dims[2]).unwrap(),
        sensor: SensorSpec {
            physical_diameter: 100.0,
            active_diameter: 80.0,
            standoff: 0.0,
            edge_gap: 0.0,
        },
        desired_coverage: coverage,
    }
}

fn run(config: &LayoutConfig) -> Layout {
    generate_layout(config).expect("config should be valid")
}

/// Check the invariants every layout must satisfy.
fn assert_layout_invariants(config: &LayoutConfig, layout: &Layout) {
    let table = &layout.pmt_info;
    let summary = &layout.summary;
    let n = summary.total_placed as usize;

    // Conservation
    let allocated: u64 = summary.walls.iter().map(|w| w.allocated).sum();
    assert_eq!(allocated, summary.total_placed);
    for column in [&table.x, &table.y, &table.z, &table.dir_x, &table.dir_y, &table.dir_z] {
        assert_eq!(column.len(), n);
    }
    assert_eq!(table.sensor_type.len(), n);

    // Capacity bound
    assert!(summary.total_placed <= summary.max_possible);
    for wall in &summary.walls {
        assert!(wall.allocated <= wall.capacity, "{} over capacity", wall.wall);
    }
    if summary.max_possible > 0 {
        assert_eq!(
            summary.total_placed,
            summary.target_count.min(summary.max_possible)
        );
    }

    // Coverage consistency
    let expected = if summary.total_placed == 0 {
        0.0
    } else {
        summary.total_placed as f64 * summary.active_area / summary.total_wall_area
    };
    assert_relative_eq!(summary.achieved_coverage, expected, max_relative = 1e-9);

    // Geometry and orientation, walls emitted in enumeration order
    let half = config.box_dims.half_extents();
    let offset = config.sensor.physical_radius() + config.sensor.standoff;
    let mut sensors = table.sensors();
    for wall_alloc in &summary.walls {
        let wall = wall_alloc.wall.descriptor();
        let expected_fixed = wall.sign_f64() * (half[wall.fixed_axis] - offset);
        for _ in 0..wall_alloc.allocated {
            let sensor = sensors.next().expect("table shorter than allocation");
            assert!((sensor.position[wall.fixed_axis] - expected_fixed).abs() < 1e-6);

            let norm = sensor.direction.iter().map(|c| c * c).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
            for axis in 0..3 {
                if axis == wall.fixed_axis {
                    assert_eq!(sensor.direction[axis], -wall.sign_f64());
                } else {
                    assert_eq!(sensor.direction[axis], 0.0);
                }
            }

            // In-plane coordinates stay inside the pattern region
            for (i, &axis) in wall.face_axes.iter().enumerate() {
                let limit = (config.box_dims.as_array()[axis] - 2.0 * config.sensor.edge_gap) / 2.0;
                assert!(sensor.position[axis].abs() <= limit + 1e-9, "axis {i}");
            }
            assert_eq!(sensor.sensor_type, 1);
        }
    }
    assert!(sensors.next().is_none(), "table longer than allocation");
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn scenario_a_symmetric_cube() {
    let config = config([1000.0, 1000.0, 1000.0], 0.10);
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    let summary = &layout.summary;
    let capacities: Vec<u64> = summary.walls.iter().map(|w| w.capacity).collect();
    assert!(capacities.iter().all(|&c| c == capacities[0]));

    let counts: Vec<u64> = summary.walls.iter().map(|w| w.allocated).collect();
    let spread = counts.iter().max().unwrap() - counts.iter().min().unwrap();
    assert!(spread <= 1, "counts={counts:?}");

    assert!(summary.target_count < summary.max_possible);
    assert_eq!(summary.total_placed, summary.target_count);
    assert!(summary.diagnostics.is_empty(), "{:?}", summary.diagnostics);
}

#[test]
fn scenario_a_uneven_target_spreads_by_one() {
    // 0.131 * 6e6 / (π·40²) ≈ 156.4 → 157 over six equal walls
    let config = config([1000.0, 1000.0, 1000.0], 0.131);
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    let counts: Vec<u64> = layout.summary.walls.iter().map(|w| w.allocated).collect();
    assert_eq!(counts.iter().sum::<u64>(), 157);
    // the single leftover unit goes to the first wall in table order
    assert_eq!(counts, vec![27, 26, 26, 26, 26, 26]);
}

#[test]
fn scenario_b_degenerate_walls() {
    // Lz = 50 < physical diameter: every wall with z in-plane has no room
    let config = config([1000.0, 1000.0, 50.0], 0.3);
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    for wall in &layout.summary.walls {
        match wall.wall {
            WallId::PosZ | WallId::NegZ => assert!(wall.allocated > 0),
            _ => {
                assert_eq!(wall.capacity, 0, "{}", wall.wall);
                assert_eq!(wall.allocated, 0, "{}", wall.wall);
                assert!(wall.grid.is_none());
            }
        }
    }
}

#[test]
fn scenario_b_gap_makes_axis_degenerate() {
    // 1000 - 2*(50 + 460) < 0 along every axis
    let mut config = config([1000.0, 1000.0, 1000.0], 0.2);
    config.sensor.edge_gap = 460.0;
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    assert_eq!(layout.summary.max_possible, 0);
    assert_eq!(layout.summary.total_placed, 0);
    assert!(layout.pmt_info.is_empty());
    assert_eq!(
        layout.summary.diagnostics,
        vec![Diagnostic::NoPlacementPossible]
    );
}

#[test]
fn scenario_c_over_target() {
    let config = config([1000.0, 1000.0, 1000.0], 0.9);
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    let summary = &layout.summary;
    assert_eq!(summary.max_possible, 600);
    assert_eq!(summary.total_placed, summary.max_possible);
    assert_ne!(summary.target_count, summary.max_possible);
    assert!(summary.target_count > summary.max_possible);
    assert!(summary.truncated());
    assert!(summary.diagnostics.contains(&Diagnostic::TargetTruncated {
        desired_coverage: 0.9,
        target_count: summary.target_count,
        max_possible: 600,
    }));

    // Full walls use their theoretical grid, pitch equals the diameter
    for wall in &summary.walls {
        let grid = wall.grid.unwrap();
        assert_eq!((grid.rows, grid.cols), (10, 10));
        assert_relative_eq!(grid.spacing[0], 100.0);
    }
}

#[test]
fn scenario_d_zero_coverage() {
    let config = config([1000.0, 1000.0, 1000.0], 0.0);
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    let summary = &layout.summary;
    assert_eq!(summary.target_count, 0);
    assert_eq!(summary.total_placed, 0);
    assert!(layout.pmt_info.is_empty());
    assert_eq!(summary.achieved_coverage, 0.0);
    assert!(!summary.truncated());
    assert!(summary.walls.iter().all(|w| w.grid.is_none()));
}

#[test]
fn scenario_d_zero_coverage_on_huge_box() {
    // 10 km cube with 100 mm sensors: 100_000 per axis, 1e10 per wall
    let config = config([10_000_000.0, 10_000_000.0, 10_000_000.0], 0.0);
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    let summary = &layout.summary;
    assert_eq!(summary.max_possible, 60_000_000_000);
    assert!(summary.walls.iter().all(|w| w.capacity == 10_000_000_000));
    assert_eq!(summary.total_placed, 0);
    assert!(summary.diagnostics.is_empty());
}

// ── Pipeline coherence ─────────────────────────────────────────────────

#[test]
fn default_detector_layout() {
    let config = LayoutConfig::default();
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);

    let faces = face_catalog(&config.box_dims, &config.sensor);
    let wall_area: f64 = faces.iter().map(|f| f.area).sum();
    let target = target_count(
        config.desired_coverage,
        wall_area,
        active_area(config.sensor.active_diameter),
    );
    assert_eq!(layout.summary.target_count, target);
    assert!(layout.summary.achieved_coverage >= config.desired_coverage);
}

#[test]
fn standoff_and_gap_respected() {
    let mut config = config([2000.0, 3000.0, 1500.0], 0.15);
    config.sensor.standoff = 25.0;
    config.sensor.edge_gap = 40.0;
    let layout = run(&config);
    assert_layout_invariants(&config, &layout);
    assert!(layout.summary.total_placed > 0);
}

#[test]
fn deterministic_output() {
    let config = config([1200.0, 3400.0, 900.0], 0.25);
    let first = run(&config);
    let second = run(&config);
    assert_eq!(first, second);
}

#[test]
fn coverage_sweep_keeps_invariants() {
    for step in 0..=20 {
        let coverage = f64::from(step) / 20.0;
        for dims in [
            [1000.0, 1000.0, 1000.0],
            [1000.0, 4000.0, 250.0],
            [180.0, 5000.0, 600.0],
        ] {
            let config = config(dims, coverage);
            let layout = run(&config);
            assert_layout_invariants(&config, &layout);
        }
    }
}

#[test]
fn walls_emitted_in_table_order() {
    let config = config([1000.0, 1000.0, 1000.0], 0.05);
    let layout = run(&config);
    let order: Vec<WallId> = layout.summary.walls.iter().map(|w| w.wall).collect();
    let expected: Vec<WallId> = WALLS.iter().map(|w| w.id).collect();
    assert_eq!(order, expected);
}
